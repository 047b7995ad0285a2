mod support;

use std::sync::Arc;

use prov_core::{provision, CoreEngineError, ProvisionEventKind, ProvisionRequestError, RunStatus, ServiceModule};
use prov_postgresql::{PostgresqlError, PostgresqlProvisioningContext, PostgresqlProvisioningParameters,
                      PostgresqlSettings, SetupDatabaseStep, SetupStatements, PLANS, SERVICE_ID};
use serde_json::json;
use support::{fqdn_outputs, module, FakeSessions, StubDeployer};

fn eastus() -> PostgresqlProvisioningParameters {
    PostgresqlProvisioningParameters { location: "eastus".into() }
}

#[test]
fn end_to_end_eastus() {
    let (m, deployer, sessions) = module(StubDeployer::returning(fqdn_outputs("x.example.net")), FakeSessions::default());
    let params = eastus();
    m.validate_provisioning_parameters(&params).unwrap();
    let provisioner = m.get_provisioner(SERVICE_ID, PLANS[0].id).unwrap();
    assert_eq!(provisioner.step_ids(), vec!["preProvision", "deployARMTemplate", "setupDatabase"]);

    let mut run = provisioner.start(m.new_provisioning_context(), &params);

    let after_pre = run.step().unwrap().clone();
    assert!(!after_pre.resource_group_name.is_empty());
    assert!(!after_pre.arm_deployment_name.is_empty());
    assert!(!after_pre.server_name.is_empty());
    assert!(!after_pre.administrator_login_password.is_empty());
    assert!(!after_pre.database_name.is_empty());
    assert!(after_pre.fully_qualified_domain_name.is_empty());

    let after_deploy = run.step().unwrap().clone();
    assert_eq!(after_deploy.fully_qualified_domain_name, "x.example.net");

    let after_setup = run.step().unwrap().clone();
    assert_eq!(after_setup, after_deploy);
    assert_eq!(run.status(), RunStatus::Completed);

    let call = deployer.calls.lock().unwrap()[0].clone();
    assert_eq!(call.location, "eastus");
    assert_eq!(call.deployment_name, after_pre.arm_deployment_name);
    assert_eq!(call.resource_group_name, after_pre.resource_group_name);
    assert_eq!(call.parameters["serverName"], json!(after_pre.server_name));
    assert_eq!(call.parameters["administratorLoginPassword"], json!(after_pre.administrator_login_password));
    assert_eq!(call.parameters["databaseName"], json!(after_pre.database_name));
    assert_eq!(call.parameters["skuName"], json!(PLANS[0].sku.name));

    let expected = SetupStatements::new(&after_pre.database_name, "postgres");
    assert_eq!(sessions.committed(),
               vec![expected.create_role, expected.grant_role, expected.transfer_ownership]);
    assert_eq!(sessions.open_sessions(), 0, "connection must be released");

    let opened = sessions.db.lock().unwrap().opened[0].clone();
    assert_eq!(opened.host, "x.example.net");
    assert_eq!(opened.user, format!("postgres@{}", after_pre.server_name));
}

#[test]
fn missing_fqdn_halts_before_setup() {
    let (m, deployer, sessions) = module(StubDeployer::returning(json!({ "somethingElse": "x" })), FakeSessions::default());
    let provisioner = m.get_provisioner(SERVICE_ID, PLANS[0].id).unwrap();
    let params = eastus();
    let mut run = provisioner.start(m.new_provisioning_context(), &params);

    run.step().unwrap();
    let err = run.step().unwrap_err();
    assert_eq!(err.step_id(), Some("deployARMTemplate"));
    assert!(err.to_string().contains("fullyQualifiedDomainName"));
    assert_eq!(run.status(), RunStatus::Failed);
    assert!(run.context().fully_qualified_domain_name.is_empty());
    assert!(matches!(run.step(), Err(CoreEngineError::ProvisioningHasFailed)));

    assert_eq!(deployer.call_count(), 1);
    assert!(sessions.trace().is_empty(), "setupDatabase must never run");
    assert!(!run.events()
                .iter()
                .any(|e| matches!(&e.kind, ProvisionEventKind::StepStarted { step_id, .. } if step_id == "setupDatabase")));
}

#[test]
fn non_string_fqdn_is_fatal() {
    let (m, _deployer, sessions) = module(StubDeployer::returning(json!({ "fullyQualifiedDomainName": 42 })),
                                          FakeSessions::default());
    let err = m.get_provisioner(SERVICE_ID, PLANS[0].id)
               .unwrap()
               .run(m.new_provisioning_context(), &eastus())
               .unwrap_err();
    assert_eq!(err.step_id(), Some("deployARMTemplate"));
    assert!(sessions.trace().is_empty());
}

#[test]
fn deployer_failure_is_wrapped() {
    let (m, _deployer, _sessions) = module(StubDeployer::failing("quota exceeded"), FakeSessions::default());
    let err = m.get_provisioner(SERVICE_ID, PLANS[0].id)
               .unwrap()
               .run(m.new_provisioning_context(), &eastus())
               .unwrap_err();
    let text = err.to_string();
    assert!(text.contains("error deploying ARM template"));
    assert!(text.contains("quota exceeded"));
}

#[test]
fn failed_grant_rolls_back_everything() {
    let (m, _deployer, sessions) = module(StubDeployer::returning(fqdn_outputs("x.example.net")),
                                          FakeSessions::failing_on("GRANT"));
    let err = m.get_provisioner(SERVICE_ID, PLANS[0].id)
               .unwrap()
               .run(m.new_provisioning_context(), &eastus())
               .unwrap_err();
    assert_eq!(err.step_id(), Some("setupDatabase"));
    assert!(err.to_string().contains("error adding role"));

    assert!(sessions.committed().is_empty(), "no partial schema change may persist");
    let trace = sessions.trace();
    assert_eq!(trace.first().map(String::as_str), Some("BEGIN"));
    assert_eq!(trace.last().map(String::as_str), Some("ROLLBACK"));
    assert!(!trace.iter().any(|s| s.starts_with("ALTER DATABASE")));
    assert_eq!(sessions.open_sessions(), 0);
}

#[test]
fn failed_ownership_transfer_rolls_back_role_and_grant() {
    let (m, _deployer, sessions) = module(StubDeployer::returning(fqdn_outputs("x.example.net")),
                                          FakeSessions::failing_on("ALTER DATABASE"));
    let err = m.get_provisioner(SERVICE_ID, PLANS[0].id)
               .unwrap()
               .run(m.new_provisioning_context(), &eastus())
               .unwrap_err();
    assert!(err.to_string().contains("error transferring ownership"));
    assert!(sessions.committed().is_empty());
    assert_eq!(sessions.trace().len(), 5);
}

#[test]
fn failed_rollback_keeps_primary_error() {
    let sessions = FakeSessions { fail_on: Some("GRANT"),
                                  fail_rollback: true,
                                  ..Default::default() };
    let (m, _deployer, sessions) = module(StubDeployer::returning(fqdn_outputs("x.example.net")), sessions);
    let err = m.get_provisioner(SERVICE_ID, PLANS[0].id)
               .unwrap()
               .run(m.new_provisioning_context(), &eastus())
               .unwrap_err();
    assert_eq!(err.step_id(), Some("setupDatabase"));
    let text = err.to_string();
    assert!(text.contains("error adding role"), "{text}");
    assert!(!text.contains("rollback"), "{text}");
    assert!(sessions.committed().is_empty());
    assert_eq!(sessions.trace().last().map(String::as_str), Some("ROLLBACK"));
    assert_eq!(sessions.open_sessions(), 0);
}

#[test]
fn setup_accepts_existing_database_names() {
    let sessions = FakeSessions::default();
    let step = SetupDatabaseStep::new(Arc::new(sessions.clone()), PostgresqlSettings::default());
    let context = PostgresqlProvisioningContext { server_name: "srv".into(),
                                                  administrator_login_password: "Pa55word!xyz".into(),
                                                  database_name: "1legacy_db".into(),
                                                  fully_qualified_domain_name: "x.example.net".into(),
                                                  ..Default::default() };
    step.setup(&context).unwrap();
    assert_eq!(sessions.committed().len(), 3);

    let bad = PostgresqlProvisioningContext { database_name: "a$$b".into(),
                                              ..context };
    assert!(matches!(step.setup(&bad), Err(PostgresqlError::InvalidDatabaseName(_))));
}

#[test]
fn refused_connection_fails_setup() {
    let sessions = FakeSessions { refuse_connections: true,
                                  ..Default::default() };
    let (m, _deployer, sessions) = module(StubDeployer::returning(fqdn_outputs("x.example.net")), sessions);
    let err = m.get_provisioner(SERVICE_ID, PLANS[0].id)
               .unwrap()
               .run(m.new_provisioning_context(), &eastus())
               .unwrap_err();
    assert_eq!(err.step_id(), Some("setupDatabase"));
    assert!(err.to_string().contains("error connecting to database server"));
    assert!(sessions.trace().is_empty());
}

#[test]
fn unknown_service_or_plan_is_rejected() {
    let (m, _deployer, _sessions) = module(StubDeployer::returning(fqdn_outputs("x.example.net")), FakeSessions::default());
    assert!(matches!(m.get_provisioner("not-postgres", PLANS[0].id), Err(CoreEngineError::UnknownService(_))));
    assert!(matches!(m.get_provisioner(SERVICE_ID, "gold"), Err(CoreEngineError::UnknownPlan { .. })));
}

#[test]
fn provision_request_decodes_validates_and_composes_credentials() {
    let (m, _deployer, _sessions) = module(StubDeployer::returning(fqdn_outputs("x.example.net")), FakeSessions::default());

    let bad_shape = provision(&m, SERVICE_ID, PLANS[0].id, json!({ "region": "eastus" }));
    assert!(matches!(bad_shape, Err(ProvisionRequestError::Contract(_))));

    let bad_region = provision(&m, SERVICE_ID, PLANS[0].id, json!({ "location": "mars" }));
    match bad_region {
        Err(ProvisionRequestError::Validation(v)) => assert_eq!(v.field, "location"),
        other => panic!("expected validation error, got {other:?}"),
    }

    let ctx = provision(&m, SERVICE_ID, PLANS[0].id, json!({ "location": "eastus" })).unwrap();
    let (details, secure) = m.instance_details(&ctx);
    let creds = m.credentials(&details, &secure);
    assert_eq!(creds.host, "x.example.net");
    assert_eq!(creds.port, 5432);
    assert_eq!(creds.database, ctx.database_name);
    assert_eq!(creds.username, format!("postgres@{}", ctx.server_name));
    assert_eq!(creds.password, ctx.administrator_login_password);
    assert!(!serde_json::to_string(&details).unwrap().contains(&ctx.administrator_login_password));
}
