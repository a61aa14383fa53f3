//! Config file loading and wiring

use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use gatehouse::{ConfigError, GatehouseConfig, Gatekeeper, KeyRequest, Listener};
use std::io::Write;
use tempfile::NamedTempFile;

fn cheap_hash(password: &str) -> String {
    let argon2 = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(1024, 1, 1, None).unwrap(),
    );
    let salt = SaltString::generate(&mut OsRng);
    argon2.hash_password(password.as_bytes(), &salt).unwrap().to_string()
}

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn basic(password: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    format!("Basic {}", STANDARD.encode(format!("admin:{}", password)))
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = GatehouseConfig::load(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, GatehouseConfig::default());
}

#[test]
fn test_load_full_file() {
    let hash = cheap_hash("letmein");
    let file = write_config(&format!(
        r#"
internal_port = 2000
external_port = 2001
ingress_url = "https://node.internal:1633"

[auth]
encryption_key = "file-secret"
admin_password_hash = "{}"

[policy]
decision_cache_capacity = 16
"#,
        hash
    ));

    let config = GatehouseConfig::load(file.path()).unwrap();
    assert_eq!(config.internal_port, 2000);
    assert_eq!(config.external_port, 2001);
    assert_eq!(config.ingress_url, "https://node.internal:1633");
    assert_eq!(config.policy.decision_cache_capacity, 16);

    let gk = Gatekeeper::from_config(&config).unwrap();
    let key = gk
        .issue_key(&basic("letmein"), &KeyRequest::new("maintainer", 60))
        .unwrap()
        .key;
    assert!(gk.authorize(&key, "/topology", "GET").is_ok());
}

#[test]
fn test_parse_error_names_file() {
    let file = write_config("internal_port = \"not a number\"\n");
    let err = GatehouseConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn test_custom_policy_and_acl() {
    let hash = cheap_hash("pw");
    let file = write_config(&format!(
        r#"
[auth]
encryption_key = "k"
admin_password_hash = "{}"

[policy]
roles = ["reader", "editor"]
inherits = [["editor", "reader"]]

[[policy.rules]]
subject = "reader"
resource = "/wiki/*"
action = "GET"

[[policy.rules]]
subject = "editor"
resource = "/wiki/*"
action = "(PUT)|(DELETE)"

[acl]
allow = ["/wiki"]
deny = ["/admin"]
"#,
        hash
    ));

    let config = GatehouseConfig::load(file.path()).unwrap();
    let gk = Gatekeeper::from_config(&config).unwrap();

    assert!(gk.admits(Listener::Internal, "/wiki/home"));
    assert!(!gk.admits(Listener::Internal, "/bytes"));
    assert!(!gk.admits(Listener::External, "/admin/users"));
    assert!(gk.admits(Listener::External, "/node"));

    let reader = gk
        .issue_key(&basic("pw"), &KeyRequest::new("reader", 60))
        .unwrap()
        .key;
    let editor = gk
        .issue_key(&basic("pw"), &KeyRequest::new("editor", 60))
        .unwrap()
        .key;

    assert!(gk.authorize(&reader, "/wiki/home", "GET").is_ok());
    assert!(gk.authorize(&reader, "/wiki/home", "PUT").is_err());
    assert!(gk.authorize(&editor, "/wiki/home", "GET").is_ok());
    assert!(gk.authorize(&editor, "/wiki/home", "DELETE").is_ok());
    assert!(gk.authorize(&editor, "/bytes/1", "GET").is_err());
}

#[test]
fn test_cyclic_policy_rejected_at_startup() {
    let file = write_config(&format!(
        r#"
[auth]
encryption_key = "k"
admin_password_hash = "{}"

[policy]
roles = ["a", "b"]
inherits = [["a", "b"], ["b", "a"]]
rules = []
"#,
        cheap_hash("pw")
    ));

    let config = GatehouseConfig::load(file.path()).unwrap();
    assert!(matches!(
        Gatekeeper::from_config(&config),
        Err(ConfigError::Auth(_))
    ));
}

#[test]
fn test_shared_port_rejected() {
    let file = write_config(
        r#"
internal_port = 1700
external_port = 1700

[auth]
encryption_key = "k"
"#,
    );
    let config = GatehouseConfig::load(file.path()).unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}
