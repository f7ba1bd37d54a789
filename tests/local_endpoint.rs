use cypher_http::{Client, ConnectionTarget, Error, ServerFault};
use serde_json::{json, Map, Value};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

struct Captured {
    head: String,
    body: Vec<u8>,
}

/// answer exactly one request with `status` and `body`, then hang up
fn serve_once(status: &str, body: &str) -> (u16, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut head = String::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read head");
            if line == "\r\n" || line.is_empty() {
                break;
            }
            head.push_str(&line);
        }

        let len = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        let mut body = vec![0; len];
        reader.read_exact(&mut body).expect("read body");

        stream.write_all(response.as_bytes()).expect("write response");
        stream.flush().expect("flush");
        Captured { head, body }
    });

    (port, handle)
}

fn local_client(port: u16) -> Client {
    let http = reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .expect("test http client");
    Client::new(ConnectionTarget::new("http://127.0.0.1", port).with_http_client(http))
        .expect("client")
}

#[cfg_attr(miri, ignore)]
#[test]
fn posts_query_and_params_as_json() {
    let (port, server) = serve_once("200 OK", r#"{"columns":["n"],"data":[[5]]}"#);
    let client = local_client(port);

    let params: Map<String, Value> = [
        ("name1".to_string(), json!("Mike")),
        ("name2".to_string(), json!("Matt")),
        ("nested".to_string(), json!({"since": 2010, "tags": ["a", null]})),
    ]
    .into_iter()
    .collect();

    let value = client
        .cypher("MERGE (p:Person {name: {name1}}) RETURN id(p)")
        .params([("ignored", "first binding")])
        .params(params.clone())
        .execute()
        .and_then(|results| results.as_int())
        .expect("query");
    assert_eq!(value, 5);

    let captured = server.join().expect("server thread");
    assert!(captured.head.starts_with("POST /db/data/cypher HTTP/1.1\r\n"));
    assert!(captured
        .head
        .to_ascii_lowercase()
        .contains("content-type: application/json"));

    let sent: Value = serde_json::from_slice(&captured.body).expect("json body");
    assert_eq!(
        sent["query"],
        "MERGE (p:Person {name: {name1}}) RETURN id(p)"
    );
    assert_eq!(sent["params"], Value::Object(params));
}

#[cfg_attr(miri, ignore)]
#[test]
fn decodes_nodes_over_http() {
    let (port, server) = serve_once(
        "200 OK",
        r#"{"columns":["p1","p2"],"data":[[{"data":{"name":"Mike"}},{"data":{"name":"Matt"}}]]}"#,
    );
    let client = local_client(port);

    let nodes = client
        .cypher("MATCH (p1), (p2) RETURN p1, p2")
        .execute()
        .and_then(|results| results.as_nodes())
        .expect("nodes");
    server.join().expect("server thread");

    let names: Vec<_> = nodes.iter().map(|n| n.properties["name"].clone()).collect();
    assert_eq!(names, vec![json!("Mike"), json!("Matt")]);
}

#[cfg_attr(miri, ignore)]
#[test]
fn server_fault_is_returned_by_accessor() {
    let (port, server) = serve_once(
        "400 Bad Request",
        r#"{"message":"boom","exception":"E","fullname":"pkg.E","stacktrace":["a","b"]}"#,
    );
    let client = local_client(port);

    let err = client
        .cypher("RETURN {missing}")
        .execute()
        .and_then(|results| results.as_int())
        .unwrap_err();
    server.join().expect("server thread");

    assert_eq!(err.to_string(), "boom");
    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.fault(),
        Some(&ServerFault {
            message: "boom".to_string(),
            exception: "E".to_string(),
            full_name: "pkg.E".to_string(),
            stacktrace: vec!["a".to_string(), "b".to_string()],
        })
    );
}

#[cfg_attr(miri, ignore)]
#[test]
fn malformed_fault_body_degrades() {
    let (port, server) = serve_once("500 Internal Server Error", "<html>oops</html>");
    let client = local_client(port);

    let err = client.cypher("RETURN 1").execute().unwrap_err();
    server.join().expect("server thread");

    match err {
        Error::Server { status, fault, body } => {
            assert_eq!(status, 500);
            assert_eq!(fault, ServerFault::default());
            assert_eq!(body, "<html>oops</html>");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[cfg_attr(miri, ignore)]
#[test]
fn unreachable_endpoint_is_http_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    };
    let client = local_client(port);

    let err = client.cypher("RETURN 1").execute().unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}
