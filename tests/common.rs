#![allow(dead_code)]

use fantoccini::error::{CmdError, NewSessionError};
use http::{header, Response, StatusCode};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use parabank_e2e::error::{FlowError, SetupError};
use parabank_e2e::{Capabilities, Config};
use std::net::Ipv4Addr;
use std::sync::{mpsc, Arc};
use tokio::net::TcpListener;
use url::Url;

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn make_capabilities(s: &str) -> Capabilities {
    match s {
        "firefox" => {
            let mut caps = Capabilities::new();
            let opts = serde_json::json!({ "args": ["--headless"] });
            caps.insert("moz:firefoxOptions".to_string(), opts);
            caps
        }
        "chrome" => {
            let mut caps = Capabilities::new();
            let opts = serde_json::json!({
                "args": ["--headless", "--disable-gpu", "--no-sandbox", "--disable-dev-shm-usage"],
                "binary":
                    if std::path::Path::new("/usr/bin/chromium-browser").exists() {
                        // on Ubuntu, it's called chromium-browser
                        "/usr/bin/chromium-browser"
                    } else if std::path::Path::new("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome").exists() {
                        // macOS
                        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"
                    } else {
                        // elsewhere, it's just called chromium
                        "/usr/bin/chromium"
                    }
            });
            caps.insert("goog:chromeOptions".to_string(), opts);
            caps
        }
        browser => unimplemented!("unsupported browser backend {}", browser),
    }
}

pub fn webdriver_url(s: &str) -> &'static str {
    match s {
        "firefox" => "http://localhost:4444",
        "chrome" => "http://localhost:9515",
        browser => unimplemented!("unsupported browser backend {}", browser),
    }
}

/// Configuration for a live test: the environment, with the WebDriver
/// address defaulted per browser unless the environment already names one.
pub fn test_config(endpoint: &str) -> Config {
    let mut config = Config::from_env().expect("configuration from the environment");
    if std::env::var_os(parabank_e2e::config::ENV_WEBDRIVER_URL).is_none() {
        config.webdriver_url =
            Url::parse(webdriver_url(endpoint)).expect("static webdriver url");
    }
    config
}

pub fn handle_test_error(
    res: Result<Result<(), FlowError>, Box<dyn std::any::Any + Send>>,
) -> bool {
    match res {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            eprintln!("test future failed to resolve: {:?}", e);
            false
        }
        Err(e) => {
            if let Some(e) = e.downcast_ref::<FlowError>() {
                eprintln!("test future panicked: {:?}", e);
            } else if let Some(e) = e.downcast_ref::<SetupError>() {
                eprintln!("test future panicked: {:?}", e);
            } else if let Some(e) = e.downcast_ref::<CmdError>() {
                eprintln!("test future panicked: {:?}", e);
            } else if let Some(e) = e.downcast_ref::<NewSessionError>() {
                eprintln!("test future panicked: {:?}", e);
            } else {
                eprintln!("test future panicked; an assertion probably failed");
            }
            false
        }
    }
}

#[macro_export]
macro_rules! tester {
    // The ident should point to an async fn that takes a Session.
    ($f:ident, $endpoint:expr) => {{
        use std::thread;

        common::init_tracing();
        let config = common::test_config($endpoint);
        let caps = common::make_capabilities($endpoint);

        // run the test in its own thread to catch panics
        let res = thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let session =
                    parabank_e2e::Session::open_with_capabilities(&config, caps)
                        .await
                        .expect("failed to establish test session");
                // keep a handle so the browser dies even if the test panics
                let browser = session.browser().clone();
                let res = tokio::spawn($f(session)).await;
                let _ = browser.close().await;
                match res {
                    Ok(flow) => flow,
                    Err(joined) => std::panic::resume_unwind(joined.into_panic()),
                }
            })
        })
        .join();
        let success = common::handle_test_error(res);
        assert!(success);
    }};
}

/// Serve canned transaction JSON on an ephemeral port; returns the port.
///
/// `respond` maps a request path to the status and body to answer with.
pub fn setup_server<F>(respond: F) -> u16
where
    F: Fn(&str) -> (StatusCode, String) + Send + Sync + 'static,
{
    let (tx, rx) = mpsc::channel();
    let respond = Arc::new(respond);

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
                .await
                .expect("bind test server");
            let port = listener
                .local_addr()
                .expect("test server address")
                .port();
            tx.send(port).expect("report the bound port");
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => break,
                };
                let respond = Arc::clone(&respond);
                tokio::spawn(async move {
                    let service = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                        let respond = Arc::clone(&respond);
                        async move {
                            let (status, body) = respond(req.uri().path());
                            Response::builder()
                                .status(status)
                                .header(header::CONTENT_TYPE, "application/json")
                                .body(Full::new(Bytes::from(body)))
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });
    });

    rx.recv().expect("the bound port")
}
