mod cli;
mod core;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};
use serde::Serialize;

use crate::{
    cli::{Args, Command, Format},
    core::{
        battery::BatteryForm,
        cooling::CoolingForm,
        form::{Form, FormState},
        storage::StorageForm,
    },
    prelude::*,
    tables::ToTable,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();

    match args.command {
        Command::Laptop(laptop_args) => {
            check::<BatteryForm>((*laptop_args).into_fields(), args.format)
        }
        Command::Server(server_args) => {
            check::<CoolingForm>((*server_args).into_fields(), args.format)
        }
        Command::Smartphone(smartphone_args) => {
            check::<StorageForm>((*smartphone_args).into_fields(), args.format)
        }
    }
}

/// Fill in the form, submit it and print either the report or the field errors.
#[instrument(skip_all)]
fn check<F>(fields: impl IntoIterator<Item = (F::Field, Option<String>)>, format: Format) -> Result
where
    F: Form + Default,
    F::Report: Serialize + ToTable,
{
    let mut state = FormState::new(F::default());
    for (field, value) in fields {
        if let Some(value) = value {
            state.set(field, value);
        }
    }

    if state.submit() {
        info!("evaluated");
    } else {
        warn!(n_errors = state.errors().len(), "some fields are missing");
    }

    if let Some(report) = state.report() {
        return print(report, format);
    }
    print(&ErrorsOutput { errors: state.errors() }, format)?;
    Err(Error::new(state.errors().clone()).context("the form is incomplete"))
}

#[derive(Serialize)]
struct ErrorsOutput<'a, T> {
    errors: &'a T,
}

impl<T: ToTable> ToTable for ErrorsOutput<'_, T> {
    fn to_table(&self) -> comfy_table::Table {
        self.errors.to_table()
    }
}

fn print<T: Serialize + ToTable>(output: &T, format: Format) -> Result {
    match format {
        Format::Table => println!("{}", output.to_table()),
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(output).context("failed to serialize")?);
        }
    }
    Ok(())
}
