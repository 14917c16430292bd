#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use pota_progress::domain::models::HomeLocation;
use pota_progress::services::api::PotaClient;
use pota_progress::services::cache::ResponseCache;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Nothing listens here; any request that escapes the cache fails fast.
pub const OFFLINE_API: &str = "http://127.0.0.1:9";

pub const LONDON: HomeLocation = HomeLocation {
    latitude: 51.5,
    longitude: -0.12,
};

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        Self { _tmp: tmp, home }
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.home.join(".cache").join("pota-progress")
    }

    pub fn cache(&self) -> ResponseCache {
        ResponseCache::new(self.cache_dir(), Duration::from_secs(24 * 60 * 60))
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("pota-progress");
        cmd.env("HOME", &self.home).env_remove("RUST_LOG");
        cmd
    }

    /// Command pointed at an unreachable API, so it can only succeed from cache.
    pub fn offline_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--api-base", OFFLINE_API, "--timeout-secs", "2"]);
        cmd
    }

    pub fn seed(&self, url: &str, body: &Value) {
        self.cache()
            .put(url, &body.to_string())
            .expect("seed cache entry");
    }

    pub fn seed_parks(&self, home: &HomeLocation, parks: &Value) {
        self.seed(&offline_client().bounding_box_url(home), parks);
    }

    pub fn seed_profile(&self, callsign: &str, references: &[&str]) {
        self.seed(
            &offline_client().profile_url(callsign),
            &profile_body(references),
        );
    }

    pub fn seed_activators(&self, reference: &str, callsigns: &[&str]) {
        self.seed(
            &offline_client().activations_url(reference),
            &activators_body(callsigns),
        );
    }

    pub fn run_ok(&self, args: &[&str]) -> String {
        let out = self
            .offline_cmd()
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(out).expect("utf8 stdout")
    }
}

pub fn offline_client() -> PotaClient {
    PotaClient::new(OFFLINE_API, Duration::from_secs(2), None).expect("build client")
}

pub fn feature(reference: &str, name: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [longitude, latitude]},
        "properties": {"reference": reference, "name": name}
    })
}

pub fn parks_body(features: Vec<Value>) -> Value {
    json!({"type": "FeatureCollection", "features": features})
}

pub fn profile_body(references: &[&str]) -> Value {
    let activations: Vec<Value> = references
        .iter()
        .map(|r| json!({"reference": r, "date": "2024-11-01", "total": 12}))
        .collect();
    json!({
        "callsign": "M0TRT",
        "recent_activity": {"activations": activations, "hunts": []}
    })
}

pub fn activators_body(callsigns: &[&str]) -> Value {
    Value::Array(
        callsigns
            .iter()
            .map(|c| json!({"activeCallsign": c, "qso_date": "20241101", "totalQSOs": 20}))
            .collect(),
    )
}

/// Five parks north of London, deliberately out of distance order.
pub fn london_parks() -> Value {
    parks_body(vec![
        feature("X-0001", "Farthest Common", 52.3, -0.12),
        feature("GB-0001", "Hampstead Heath", 51.51, -0.12),
        feature("GB-0003", "Epping Forest", 51.8, -0.12),
        feature("GB-0002", "Highgate Wood", 51.6, -0.12),
        feature("GB-0004", "Broxbourne Woods", 52.0, -0.12),
    ])
}

pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let r = 6371.0088_f64;
    let (p1, p2) = (lat1.to_radians(), lat2.to_radians());
    let dp = p2 - p1;
    let dl = (lon2 - lon1).to_radians();
    let h = (dp / 2.0).sin().powi(2) + p1.cos() * p2.cos() * (dl / 2.0).sin().powi(2);
    2.0 * r * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Table rows (everything after the summary, header and rule lines).
pub fn rows(stdout: &str) -> Vec<&str> {
    stdout.lines().skip(3).collect()
}

/// Minimal HTTP/1.1 responder serving canned bodies by request path.
pub struct FixtureServer {
    pub base: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
    pub fn start(routes: HashMap<String, (u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture server");
        let base = format!("http://{}", listener.local_addr().expect("local addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut chunk) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&buf);
                let path = request
                    .lines()
                    .next()
                    .and_then(|l| l.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                seen.lock().expect("requests lock").push(path.clone());

                let (status, body) = routes
                    .get(&path)
                    .cloned()
                    .unwrap_or((404, "{\"error\":\"not found\"}".to_string()));
                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { base, requests }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

/// Path component of a URL built against `OFFLINE_API`.
pub fn path_of(url: &str) -> String {
    url.trim_start_matches(OFFLINE_API).to_string()
}
