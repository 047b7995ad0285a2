//! `provflow`: CLI de operador sobre el módulo PostgreSQL.
//!
//! - `locations`: regiones soportadas.
//! - `validate --location <R>`: valida parámetros de aprovisionamiento.
//! - `steps [--plan <ID>]`: steps del provisioner y hash de su definición.
//! - `pre-provision --location <R>`: genera nombres (sin desplegar) y muestra
//!   la vista no sensible.
//! - `setup-database --host --server --database`: ejecuta la preparación de
//!   la base contra un servidor real. La contraseña se lee de
//!   `PROVFLOW_ADMIN_PASSWORD`.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::info;
use prov_azure::{ArmDeployer, DeploymentError, DeploymentOutputs, DeploymentParameters, SUPPORTED_LOCATIONS};
use prov_core::{CoreEngineError, ServiceModule, ValidationError};
use prov_persistence::PgSessionProvider;
use prov_postgresql::{default_plan, PostgresqlError, PostgresqlModule, PostgresqlProvisioningContext,
                      PostgresqlProvisioningParameters, PostgresqlSettings, SetupDatabaseStep, SERVICE_ID};
use thiserror::Error;

const ADMIN_PASSWORD_VAR: &str = "PROVFLOW_ADMIN_PASSWORD";

#[derive(Parser, Debug)]
#[command(name = "provflow", version, about = "Managed PostgreSQL provisioning pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the regions the deployer accepts
    Locations,
    /// Validate provisioning parameters
    Validate {
        #[arg(long)]
        location: String,
    },
    /// Show the ordered steps of the provisioner for a plan
    Steps {
        /// Plan id (defaults to the first catalog plan)
        #[arg(long)]
        plan: Option<String>,
    },
    /// Run preProvision only and print the generated non-secret names
    PreProvision {
        #[arg(long)]
        location: String,
    },
    /// Run setupDatabase against an already deployed server
    SetupDatabase {
        /// Fully qualified domain name of the server
        #[arg(long)]
        host: String,
        /// Server name used to build the `login@server` user
        #[arg(long)]
        server: String,
        /// Database (and role) name: letters, digits and `_`, up to 63 bytes
        #[arg(long)]
        database: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Engine(#[from] CoreEngineError),
    #[error(transparent)]
    Setup(#[from] PostgresqlError),
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
    #[error("could not render output: {0}")]
    Render(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::MissingEnv(_) => 3,
            Self::Engine(_) | Self::Setup(_) | Self::Render(_) => 4,
        }
    }
}

/// Desplegador para comandos que nunca llegan a `deployARMTemplate`.
struct DetachedDeployer;

impl ArmDeployer for DetachedDeployer {
    fn deploy(&self,
              _deployment_name: &str,
              _resource_group_name: &str,
              _location: &str,
              _template: &[u8],
              _parameters: &DeploymentParameters)
              -> Result<DeploymentOutputs, DeploymentError> {
        Err(DeploymentError::Unavailable("no deployer configured for the CLI".into()))
    }
}

type CliModule = PostgresqlModule<DetachedDeployer, PgSessionProvider>;

fn build_module() -> CliModule {
    PostgresqlModule::new(Arc::new(DetachedDeployer),
                          Arc::new(PgSessionProvider),
                          PostgresqlSettings::from_env())
}

fn params(location: String) -> PostgresqlProvisioningParameters {
    PostgresqlProvisioningParameters { location }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let module = build_module();
    match cli.command {
        Commands::Locations => {
            for location in SUPPORTED_LOCATIONS {
                println!("{location}");
            }
        }
        Commands::Validate { location } => {
            module.validate_provisioning_parameters(&params(location))?;
            println!("ok");
        }
        Commands::Steps { plan } => {
            let plan_id = plan.unwrap_or_else(|| default_plan().id.to_string());
            let provisioner = module.get_provisioner(SERVICE_ID, &plan_id)?;
            for (index, id) in provisioner.step_ids().iter().enumerate() {
                println!("{index}: {id}");
            }
            println!("definition_hash: {}", provisioner.definition_hash());
        }
        Commands::PreProvision { location } => {
            let params = params(location);
            module.validate_provisioning_parameters(&params)?;
            let provisioner = module.get_provisioner(SERVICE_ID, default_plan().id)?;
            let mut run = provisioner.start(module.new_provisioning_context(), &params);
            let context = run.step()?;
            let (details, _secure) = module.instance_details(context);
            println!("{}", serde_json::to_string_pretty(&details)?);
        }
        Commands::SetupDatabase { host, server, database } => {
            let password = std::env::var(ADMIN_PASSWORD_VAR).map_err(|_| CliError::MissingEnv(ADMIN_PASSWORD_VAR))?;
            let context = PostgresqlProvisioningContext { server_name: server,
                                                          administrator_login_password: password,
                                                          database_name: database,
                                                          fully_qualified_domain_name: host,
                                                          ..Default::default() };
            let step = SetupDatabaseStep::new(Arc::new(PgSessionProvider), module.settings().clone());
            step.setup(&context)?;
            info!("setup-database finished for {}", context.database_name);
            println!("ok");
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("[provflow] {e}");
        std::process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["provflow", "validate", "--location", "eastus"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate { ref location } if location == "eastus"));

        let cli = Cli::try_parse_from(["provflow", "steps"]).unwrap();
        assert!(matches!(cli.command, Commands::Steps { plan: None }));

        let cli = Cli::try_parse_from(["provflow",
                                       "setup-database",
                                       "--host",
                                       "x.example.net",
                                       "--server",
                                       "srv",
                                       "--database",
                                       "abcde12345"]).unwrap();
        assert!(matches!(cli.command, Commands::SetupDatabase { .. }));
    }

    #[test]
    fn validate_requires_location() {
        assert!(Cli::try_parse_from(["provflow", "validate"]).is_err());
    }

    #[test]
    fn exit_codes_follow_error_kind() {
        let e = CliError::from(ValidationError::new("location", "invalid location: \"mars\""));
        assert_eq!(e.exit_code(), 2);
        assert_eq!(CliError::MissingEnv(ADMIN_PASSWORD_VAR).exit_code(), 3);
        assert_eq!(CliError::from(CoreEngineError::UnknownPlan { service_id: SERVICE_ID.into(),
                                                                 plan_id: "gold".into() }).exit_code(),
                   4);
    }

    #[test]
    fn detached_deployer_refuses() {
        let out = DetachedDeployer.deploy("d", "rg", "eastus", b"{}", &DeploymentParameters::new());
        assert!(matches!(out, Err(DeploymentError::Unavailable(_))));
    }
}
