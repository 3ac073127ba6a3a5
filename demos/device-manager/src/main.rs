//! A command line tool managing the devices and device types registered on a
//! SiteWhere instance.
//!
//! ## Usage
//!
//! ```bash
//! # List the device types of a local instance
//! device-manager device-types --include-asset
//!
//! # Register a device
//! device-manager create-device dev-001 thermometer --comments "Cold room"
//!
//! # Remove it
//! device-manager --url https://iot.example.com delete-device dev-001
//! ```

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use serde::Serialize;

use sitewhere::device::DeviceCreateRequest;
use sitewhere::device_type::{ContainerPolicy, DeviceTypeCreateRequest};
use sitewhere::query::{DeviceQuery, DeviceTypeQuery};

use sitewhere_client::auth::Credentials;
use sitewhere_client::client::{Client, Tenant};
use sitewhere_client::error::Error;

use tracing::info;
use tracing_subscriber::filter::LevelFilter;

/// Manage devices and device types on a SiteWhere instance
#[derive(Parser)]
#[command(name = "device-manager", version, about, long_about = None)]
struct Cli {
    /// Base URL of the SiteWhere instance
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Principal used to obtain a bearer credential
    #[arg(long, default_value = "admin")]
    user: String,

    /// Credential of the principal
    #[arg(long, default_value = "password")]
    password: String,

    /// Tenant identifier, sent along with the tenant authentication token
    #[arg(long, requires = "tenant_auth")]
    tenant: Option<String>,

    /// Tenant authentication token
    #[arg(long, requires = "tenant")]
    tenant_auth: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Increase logging verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a device type
    DeviceType {
        /// Device type token
        token: String,
    },
    /// List device types
    DeviceTypes {
        /// Include asset information
        #[arg(long)]
        include_asset: bool,
        #[command(flatten)]
        paging: Paging,
    },
    /// Create a device type
    CreateDeviceType(DeviceTypeArgs),
    /// Update a device type
    UpdateDeviceType(DeviceTypeArgs),
    /// Delete a device type
    DeleteDeviceType {
        /// Device type token
        token: String,
    },
    /// Show a device
    Device {
        /// Device token
        token: String,
    },
    /// List devices
    Devices {
        /// Only list devices of this device type
        #[arg(long)]
        device_type: Option<String>,
        /// Leave out devices with an active assignment
        #[arg(long)]
        exclude_assigned: bool,
        /// Include the device type of each device
        #[arg(long)]
        include_device_type: bool,
        /// Include the assignment of each device
        #[arg(long)]
        include_assignment: bool,
        /// Only list devices created before this date
        #[arg(long)]
        end_date: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Create a device
    CreateDevice(DeviceArgs),
    /// Update a device
    UpdateDevice(DeviceArgs),
    /// Delete a device
    DeleteDevice {
        /// Device token
        token: String,
    },
}

#[derive(clap::Args)]
struct Paging {
    /// Page number
    #[arg(long)]
    page: Option<u32>,
    /// Number of records per page
    #[arg(long)]
    page_size: Option<u32>,
}

#[derive(clap::Args)]
struct DeviceTypeArgs {
    /// Device type token
    token: String,
    /// Device type name
    name: String,
    /// Description
    #[arg(long)]
    description: Option<String>,
    /// Icon
    #[arg(long)]
    icon: Option<String>,
    /// Image URL
    #[arg(long)]
    image_url: Option<String>,
    /// Devices of this type host other devices
    #[arg(long)]
    composite: bool,
    /// Metadata entry, as `key=value`
    #[arg(long = "meta", value_parser = parse_entry)]
    metadata: Vec<(String, String)>,
}

impl DeviceTypeArgs {
    fn request(self) -> (String, DeviceTypeCreateRequest) {
        let mut request = DeviceTypeCreateRequest::new(self.token.clone(), self.name);
        if let Some(description) = self.description {
            request = request.description(description);
        }
        if let Some(icon) = self.icon {
            request = request.icon(icon);
        }
        if let Some(image_url) = self.image_url {
            request = request.image_url(image_url);
        }
        if self.composite {
            request = request.container_policy(ContainerPolicy::Composite);
        }
        for (key, value) in self.metadata {
            request = request.metadata(key, value);
        }
        (self.token, request)
    }
}

#[derive(clap::Args)]
struct DeviceArgs {
    /// Device token
    token: String,
    /// Token of the device type
    device_type: String,
    /// Comments
    #[arg(long)]
    comments: Option<String>,
    /// Metadata entry, as `key=value`
    #[arg(long = "meta", value_parser = parse_entry)]
    metadata: Vec<(String, String)>,
}

impl DeviceArgs {
    fn request(self) -> (String, DeviceCreateRequest) {
        let mut request = DeviceCreateRequest::new(self.token.clone(), self.device_type);
        if let Some(comments) = self.comments {
            request = request.comments(comments);
        }
        for (key, value) in self.metadata {
            request = request.metadata(key, value);
        }
        (self.token, request)
    }
}

fn parse_entry(entry: &str) -> Result<(String, String), String> {
    entry
        .split_once('=')
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("`{entry}` is not a `key=value` entry"))
}

fn client(cli: &Cli) -> Result<Client, Error> {
    let mut builder =
        Client::builder(&cli.url).credentials(Credentials::new(&cli.user, &cli.password));

    if let (Some(id), Some(auth_token)) = (&cli.tenant, &cli.tenant_auth) {
        builder = builder.tenant(Tenant::new(id, auth_token));
    }

    if let Some(timeout) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(timeout));
    }

    builder.build()
}

fn print<T: Serialize>(record: &T) {
    match serde_json::to_string_pretty(record) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error printing the record: {e}"),
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let client = client(&cli)?;
    info!("Connected to {}", client.base_url());

    match cli.command {
        Command::DeviceType { token } => print(&client.device_type(&token)?),
        Command::DeviceTypes {
            include_asset,
            paging,
        } => {
            let mut query = DeviceTypeQuery::new();
            if include_asset {
                query = query.include_asset(true);
            }
            if let Some(page) = paging.page {
                query = query.page(page);
            }
            if let Some(page_size) = paging.page_size {
                query = query.page_size(page_size);
            }
            print(&client.device_types(&query)?);
        }
        Command::CreateDeviceType(args) => {
            let (_, request) = args.request();
            print(&client.create_device_type(&request)?);
        }
        Command::UpdateDeviceType(args) => {
            let (token, request) = args.request();
            print(&client.update_device_type(&token, &request)?);
        }
        Command::DeleteDeviceType { token } => print(&client.delete_device_type(&token)?),
        Command::Device { token } => print(&client.device(&token)?),
        Command::Devices {
            device_type,
            exclude_assigned,
            include_device_type,
            include_assignment,
            end_date,
            paging,
        } => {
            let mut query = DeviceQuery::new();
            if let Some(device_type) = device_type {
                query = query.device_type(device_type);
            }
            if exclude_assigned {
                query = query.exclude_assigned(true);
            }
            if include_device_type {
                query = query.include_device_type(true);
            }
            if include_assignment {
                query = query.include_assignment(true);
            }
            if let Some(end_date) = end_date {
                query = query.end_date(end_date);
            }
            if let Some(page) = paging.page {
                query = query.page(page);
            }
            if let Some(page_size) = paging.page_size {
                query = query.page_size(page_size);
            }
            print(&client.devices(&query)?);
        }
        Command::CreateDevice(args) => {
            let (_, request) = args.request();
            print(&client.create_device(&request)?);
        }
        Command::UpdateDevice(args) => {
            let (token, request) = args.request();
            print(&client.update_device(&token, &request)?);
        }
        Command::DeleteDevice { token } => print(&client.delete_device(&token)?),
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
