use crate::db::connection::{init_db, Database};
use crate::domain::property::NewProperty;
use astra::{Body, Response};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use tempfile::TempDir;

/// Fresh database in its own temp dir, schema applied.
/// Keep the `TempDir` alive for as long as the database is used.
pub fn init_test_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db = Database::new(dir.path().join("test.sqlite").to_string_lossy());

    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    (dir, db)
}

/// A 1500 sq ft, half-acre listing.
pub fn listing(status: &str, price: f64, zip: &str) -> NewProperty {
    NewProperty {
        status: Some(status.into()),
        price,
        bed: Some(3),
        bath: Some(2),
        acre_lot: 0.5,
        full_address: Some(format!("1 Test St, Springfield {zip}")),
        street: Some("1 Test St".into()),
        city: Some("Springfield".into()),
        state: Some("New York".into()),
        zip_code: Some(zip.into()),
        house_size: 1500.0,
        sold_date: None,
        state_code: Some("NY".into()),
        ..NewProperty::default()
    }
    .with_derived_fields()
}

pub fn body_text(resp: Response) -> String {
    let mut body = String::new();
    let mut raw: Body = resp.into_body();
    raw.reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    let body = body_text(resp);
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("body is not json ({e}): {body}"))
}

/// Raw HTTP/1.1 response with a correct `Content-Length`.
pub fn http_reply(status: &str, body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
    .into_bytes()
}

/// Local HTTP endpoint answering every connection with `reply`.
/// With `None` connections are accepted and never answered.
/// Returns the base url.
pub fn http_stub(reply: Option<Vec<u8>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub listener");
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            read_request_head(&mut stream);
            match &reply {
                Some(bytes) => {
                    let _ = stream.write_all(bytes);
                }
                None => held.push(stream),
            }
        }
    });

    format!("http://{addr}")
}

fn read_request_head(stream: &mut TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
}
