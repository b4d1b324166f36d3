use std::cell::RefCell;
use std::rc::Rc;
use tul::collection::{Collection, CollectionOptions};
use tul::request::mock::MockTransport;
use tul::request::{request, JsonpOptions, JsonpRegistry, RequestError, RequestOptions, Response};
use tul::{template, Model, Value};

/// Fetched JSON feeds a keyed collection, which renders straight to markup.
#[test]
fn test_fetch_into_collection() {
    let transport = MockTransport::new();
    transport.expect("GET", "/api/files").return_ok(
        200,
        r#"[{"fileLocation": "/a.txt", "size": 10}, {"fileLocation": "/b.txt", "size": 0}]"#,
    );

    let options: RequestOptions =
        serde_json::from_str(r#"{"url": "/api/files", "isJSON": true}"#).unwrap();
    let Response::Json(Value::Array(rows)) = request(&transport, &options).unwrap() else {
        panic!("expected a JSON array");
    };

    let files = Collection::new(CollectionOptions::new().keyfield("fileLocation"));
    for row in rows {
        files.update(row).unwrap();
    }
    transport.verify();

    assert_eq!(files.keys(), vec!["/a.txt", "/b.txt"]);
    assert_eq!(
        template::render("{{:f}}{fileLocation}={size} {{/:f}}", &Value::from(files)).unwrap(),
        "/a.txt=10 /b.txt=0 "
    );
}

#[test]
fn test_failed_fetch_leaves_collection_untouched() {
    let transport = MockTransport::new();
    transport.expect("GET", "/api/files").return_ok(503, "busy");

    let files = Collection::default();
    let result = request(&transport, &RequestOptions::get("/api/files").json());

    assert!(matches!(result, Err(RequestError::Status { status: 503, .. })));
    assert!(files.is_empty());
}

/// A JSONP payload lands in a model exactly once.
#[test]
fn test_jsonp_payload_into_model() {
    let profile = Model::new();
    let mut registry = JsonpRegistry::new();
    let calls = Rc::new(RefCell::new(0));

    let target = profile.clone();
    let counter = calls.clone();
    let req = registry
        .register(&JsonpOptions::new("https://api.example.com/me?fields=name"), move |payload| {
            *counter.borrow_mut() += 1;
            if let Value::Object(props) = payload {
                for (k, v) in props {
                    target.set(&k, v).unwrap();
                }
            }
        })
        .unwrap();

    assert_eq!(
        req.url,
        format!("https://api.example.com/me?fields=name&callback=_TUL_jsonp['{}']", req.id)
    );

    let payload = Value::from(serde_json::json!({"name": "Ella"}));
    assert!(registry.dispatch(&req.id, payload.clone()));
    assert!(!registry.dispatch(&req.id, payload));

    assert_eq!(*calls.borrow(), 1);
    assert_eq!(profile.get("name"), Some(Value::from("Ella")));
}
