use clap::{Parser, Subcommand, ValueEnum};

use crate::core::{battery::BatteryField, cooling::CoolingField, storage::StorageField};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// How to print the outcome.
    #[clap(long, value_enum, default_value = "table", env = "OUTPUT_FORMAT", global = true)]
    pub format: Format,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Laptop battery health.
    #[clap(name = "laptop")]
    Laptop(Box<LaptopArgs>),

    /// Server cooling and maintenance.
    #[clap(name = "server")]
    Server(Box<ServerArgs>),

    /// Smartphone storage and performance.
    #[clap(name = "smartphone")]
    Smartphone(Box<SmartphoneArgs>),
}

/// Values are taken as typed, they are checked and parsed by the evaluation itself.
#[derive(Parser)]
pub struct LaptopArgs {
    /// Battery design capacity in milliamp-hours.
    #[clap(long, allow_hyphen_values = true, env = "DESIGN_CAPACITY_MAH")]
    pub design_capacity: Option<String>,

    /// Current full-charge capacity in milliamp-hours.
    #[clap(long, allow_hyphen_values = true, env = "CURRENT_CAPACITY_MAH")]
    pub current_capacity: Option<String>,

    /// Number of charge cycles.
    #[clap(long, allow_hyphen_values = true, env = "BATTERY_CYCLES")]
    pub cycles: Option<String>,

    /// Average battery temperature in degrees Celsius.
    #[clap(long = "avg-temp", allow_hyphen_values = true, env = "AVERAGE_TEMPERATURE_CELSIUS")]
    pub average_temperature: Option<String>,
}

impl LaptopArgs {
    pub fn into_fields(self) -> [(BatteryField, Option<String>); 4] {
        [
            (BatteryField::DesignCapacity, self.design_capacity),
            (BatteryField::CurrentCapacity, self.current_capacity),
            (BatteryField::Cycles, self.cycles),
            (BatteryField::AverageTemperature, self.average_temperature),
        ]
    }
}

#[derive(Parser)]
pub struct ServerArgs {
    /// Current CPU temperature in degrees Celsius.
    #[clap(long = "cpu-temp", allow_hyphen_values = true, env = "CPU_TEMPERATURE_CELSIUS")]
    pub cpu_temperature: Option<String>,

    /// Current fan speed in RPM.
    #[clap(long, allow_hyphen_values = true, env = "FAN_SPEED_RPM")]
    pub fan_speed: Option<String>,
}

impl ServerArgs {
    pub fn into_fields(self) -> [(CoolingField, Option<String>); 2] {
        [
            (CoolingField::CpuTemperature, self.cpu_temperature),
            (CoolingField::FanSpeed, self.fan_speed),
        ]
    }
}

#[derive(Parser)]
pub struct SmartphoneArgs {
    /// Total storage in gigabytes.
    #[clap(long, allow_hyphen_values = true, env = "TOTAL_STORAGE_GB")]
    pub total: Option<String>,

    /// Used storage in gigabytes.
    #[clap(long, allow_hyphen_values = true, env = "USED_STORAGE_GB")]
    pub used: Option<String>,

    /// Approximate system response time in milliseconds.
    #[clap(long = "response-ms", allow_hyphen_values = true, env = "RESPONSE_TIME_MS")]
    pub response_time: Option<String>,

    /// Total app cache in gigabytes.
    #[clap(long, allow_hyphen_values = true, env = "APP_CACHE_GB")]
    pub cache: Option<String>,
}

impl SmartphoneArgs {
    pub fn into_fields(self) -> [(StorageField, Option<String>); 4] {
        [
            (StorageField::Total, self.total),
            (StorageField::Used, self.used),
            (StorageField::ResponseTime, self.response_time),
            (StorageField::Cache, self.cache),
        ]
    }
}
