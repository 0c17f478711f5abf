//! Object-store precedence and fallback tests, run against a mock HTTP server.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serial_test::serial;

use super::{Fixture, env_lock};
use crate::literal::Value;
use crate::loader::builder::ConfigLoader;
use crate::object_store::{ObjectStore, ObjectStoreConfig, ObjectStoreError};

fn store_config(endpoint: String) -> ObjectStoreConfig {
    ObjectStoreConfig {
        endpoint,
        connect_timeout: Duration::from_millis(500),
        timeout: Duration::from_secs(2),
    }
}

/// Caller-supplied store that records every request.
struct RecordingStore {
    requests: Rc<RefCell<Vec<(String, String)>>>,
    response: fn() -> Result<Vec<u8>, ObjectStoreError>,
}

impl ObjectStore for RecordingStore {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        self.requests
            .borrow_mut()
            .push((bucket.to_string(), key.to_string()));
        (self.response)()
    }
}

#[test]
#[serial]
fn test_custom_store_content_wins_over_local_file() {
    let _lock = env_lock().lock().unwrap();
    let fixture = Fixture::new();
    fixture.write("site.conf", "SOURCE = 'local'\n");
    let requests = Rc::new(RefCell::new(Vec::new()));
    let store = RecordingStore {
        requests: Rc::clone(&requests),
        response: || Ok(b"SOURCE = 'signed'\n".to_vec()),
    };

    temp_env::with_var_unset("MYAPP_CONFIG_DIR", || {
        let config = ConfigLoader::new("myapp")
            .with_locator(fixture.locator())
            .with_location("s3://private-bucket/etc")
            .with_object_store(Box::new(store))
            .with_confname("site.conf")
            .load()
            .unwrap();
        assert_eq!(config.get("SOURCE"), Some(&Value::from("signed")));
    });
    assert_eq!(
        *requests.borrow(),
        vec![(
            "private-bucket".to_string(),
            "etc/myapp/site.conf".to_string()
        )]
    );
}

#[test]
#[serial]
fn test_custom_store_error_falls_back_to_filesystem() {
    let _lock = env_lock().lock().unwrap();
    let fixture = Fixture::new();
    fixture.write("site.conf", "SOURCE = 'local'\n");
    let requests = Rc::new(RefCell::new(Vec::new()));
    let store = RecordingStore {
        requests: Rc::clone(&requests),
        response: || {
            Err(ObjectStoreError::AccessDenied {
                bucket: "private-bucket".to_string(),
                key: "etc/myapp/site.conf".to_string(),
                status: 403,
            })
        },
    };

    temp_env::with_var_unset("MYAPP_CONFIG_DIR", || {
        let config = ConfigLoader::new("myapp")
            .with_locator(fixture.locator())
            .with_location("s3://private-bucket/etc")
            .with_object_store(Box::new(store))
            .with_confname("site.conf")
            .load()
            .unwrap();
        assert_eq!(config.get("SOURCE"), Some(&Value::from("local")));
    });
    assert_eq!(requests.borrow().len(), 1);
}

#[test]
#[serial]
fn test_remote_object_wins_over_local_file() {
    let _lock = env_lock().lock().unwrap();
    let fixture = Fixture::new();
    fixture.write("site.conf", "SOURCE = 'local'\n");

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/deploy-bucket/etc/myapp/site.conf")
        .with_status(200)
        .with_body("SOURCE = 'remote'\n")
        .create();

    temp_env::with_var_unset("MYAPP_CONFIG_DIR", || {
        let config = ConfigLoader::new("myapp")
            .with_locator(fixture.locator())
            .with_location("s3://deploy-bucket/etc")
            .with_object_store_config(store_config(server.url()))
            .with_confname("site.conf")
            .load()
            .unwrap();
        assert_eq!(config.get("SOURCE"), Some(&Value::from("remote")));
    });
    mock.assert();
}

#[test]
#[serial]
fn test_missing_remote_object_falls_back_to_filesystem() {
    let _lock = env_lock().lock().unwrap();
    let fixture = Fixture::new();
    fixture.write("site.conf", "SOURCE = 'local'\n");

    let mut server = mockito::Server::new();
    let _missing = server
        .mock("GET", "/deploy-bucket/etc/myapp/site.conf")
        .with_status(404)
        .create();

    temp_env::with_var_unset("MYAPP_CONFIG_DIR", || {
        let config = ConfigLoader::new("myapp")
            .with_locator(fixture.locator())
            .with_location("s3://deploy-bucket/etc")
            .with_object_store_config(store_config(server.url()))
            .with_confname("site.conf")
            .load()
            .unwrap();
        assert_eq!(config.get("SOURCE"), Some(&Value::from("local")));
    });
}

#[test]
#[serial]
fn test_empty_remote_object_falls_back_to_filesystem() {
    let _lock = env_lock().lock().unwrap();
    let fixture = Fixture::new();
    fixture.write("site.conf", "SOURCE = 'local'\n");

    let mut server = mockito::Server::new();
    let _empty = server
        .mock("GET", "/deploy-bucket/myapp/site.conf")
        .with_status(200)
        .with_body("")
        .create();

    temp_env::with_var_unset("MYAPP_CONFIG_DIR", || {
        let config = ConfigLoader::new("myapp")
            .with_locator(fixture.locator())
            .with_location("s3://deploy-bucket")
            .with_object_store_config(store_config(server.url()))
            .with_confname("site.conf")
            .load()
            .unwrap();
        assert_eq!(config.get("SOURCE"), Some(&Value::from("local")));
    });
}

#[test]
#[serial]
fn test_unreachable_store_falls_back_to_filesystem() {
    let _lock = env_lock().lock().unwrap();
    let fixture = Fixture::new();
    fixture.write("site.conf", "SOURCE = 'local'\n");

    temp_env::with_var_unset("MYAPP_CONFIG_DIR", || {
        let config = ConfigLoader::new("myapp")
            .with_locator(fixture.locator())
            .with_location("s3://deploy-bucket/etc")
            .with_object_store_config(store_config("http://127.0.0.1:1".to_string()))
            .with_confname("site.conf")
            .load()
            .unwrap();
        assert_eq!(config.get("SOURCE"), Some(&Value::from("local")));
    });
}

#[test]
#[serial]
fn test_non_object_store_location_is_ignored() {
    let _lock = env_lock().lock().unwrap();
    let fixture = Fixture::new();
    fixture.write("site.conf", "SOURCE = 'local'\n");

    temp_env::with_var_unset("MYAPP_CONFIG_DIR", || {
        let config = ConfigLoader::new("myapp")
            .with_locator(fixture.locator())
            .with_location("/srv/config")
            .with_confname("site.conf")
            .load()
            .unwrap();
        assert_eq!(config.get("SOURCE"), Some(&Value::from("local")));
    });
}
