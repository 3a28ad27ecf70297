use std::io::ErrorKind;
use actix_web::web::Data;
use actix_web::{get, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_yaml::{Mapping, Value as YamlValue};
use url::Url;
use crate::errors::InventoryErr;
use crate::services::{absolute_url, AppState, APP_TYPE_JSON};

const OPENAPI_FILE: &str = "openapi.yaml";
const MANIFEST_FILE: &str = "plugin_manifest.json";

#[derive(Serialize, Deserialize)]
struct Hello {
    message: String,
}

#[get("/hello")]
async fn hello() -> impl Responder {
    HttpResponse::Ok()
        .content_type(APP_TYPE_JSON)
        .json(Hello { message: "Hello, Evans!".to_string() })
}

#[get("/openapi.yaml")]
async fn openapi_spec(shared_state: Data<AppState>) -> Result<HttpResponse, InventoryErr> {
    let mut spec = read_document(&shared_state, OPENAPI_FILE).await?;
    if let Some(base) = &shared_state.base_url {
        spec = rewrite_servers(&spec, base)?;
    }
    Ok(HttpResponse::Ok().content_type("application/yaml").body(spec))
}

#[get("/plugin_manifest.json")]
async fn plugin_manifest(shared_state: Data<AppState>) -> Result<HttpResponse, InventoryErr> {
    let raw = read_document(&shared_state, MANIFEST_FILE).await?;
    let mut manifest: Value = serde_json::from_str(&raw)
        .map_err(|e| InventoryErr::DocumentInvalid(format!("{}: {}", MANIFEST_FILE, e)))?;
    if let Some(base) = &shared_state.base_url {
        let spec_url = absolute_url(base, OPENAPI_FILE)
            .map_err(|e| InventoryErr::DocumentInvalid(format!("{}: {}", MANIFEST_FILE, e)))?;
        if let Some(api) = manifest.get_mut("api").and_then(Value::as_object_mut) {
            api.insert("url".to_string(), Value::String(spec_url.to_string()));
        }
    }
    Ok(HttpResponse::Ok().content_type(APP_TYPE_JSON).json(manifest))
}

async fn read_document(shared_state: &AppState, name: &str) -> Result<String, InventoryErr> {
    match tokio::fs::read_to_string(shared_state.docs_dir.join(name)).await {
        Ok(doc) => Ok(doc),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(InventoryErr::DocumentMissing(name.to_string())),
        Err(e) => Err(InventoryErr::DocumentInvalid(format!("{}: {}", name, e))),
    }
}

/// Replaces the `servers` list of an OpenAPI document with a single entry
/// for `base`, adding the key when the document has none.
fn rewrite_servers(spec: &str, base: &Url) -> Result<String, InventoryErr> {
    let invalid = |e: serde_yaml::Error| InventoryErr::DocumentInvalid(format!("{}: {}", OPENAPI_FILE, e));

    let mut doc: YamlValue = serde_yaml::from_str(spec).map_err(invalid)?;
    let Some(root) = doc.as_mapping_mut() else {
        return Err(InventoryErr::DocumentInvalid(format!("{}: top level is not a mapping", OPENAPI_FILE)));
    };

    let mut server = Mapping::new();
    server.insert(
        YamlValue::String("url".to_string()),
        YamlValue::String(base.as_str().trim_end_matches('/').to_string()),
    );
    root.insert(
        YamlValue::String("servers".to_string()),
        YamlValue::Sequence(vec![YamlValue::Mapping(server)]),
    );

    serde_yaml::to_string(&doc).map_err(invalid)
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use tempfile::tempdir;
    use crate::services::{configure, test_support};
    use super::*;

    const SPEC: &str = "openapi: 3.0.1\ninfo:\n  title: Inventory\nservers:\n  - url: http://localhost:8000\npaths: {}\n";
    const MANIFEST: &str = r#"{"schema_version": "v1", "name_for_model": "inventory", "api": {"type": "openapi", "url": "http://localhost:8000/openapi.yaml"}}"#;

    fn write_docs(dir: &std::path::Path) {
        let docs = dir.join("docs");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::write(docs.join(OPENAPI_FILE), SPEC).unwrap();
        std::fs::write(docs.join(MANIFEST_FILE), MANIFEST).unwrap();
    }

    fn servers_of(rewritten: &str) -> Vec<String> {
        let doc: YamlValue = serde_yaml::from_str(rewritten).unwrap();
        doc["servers"]
            .as_sequence()
            .unwrap()
            .iter()
            .map(|s| s["url"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_rewrite_servers() {
        let base = Url::parse("https://inventory.example.com/").unwrap();
        let rewritten = rewrite_servers(SPEC, &base).unwrap();
        assert_eq!(servers_of(&rewritten), vec!["https://inventory.example.com"]);
        assert!(!rewritten.contains("localhost"));

        let doc: YamlValue = serde_yaml::from_str(&rewritten).unwrap();
        assert_eq!(doc["info"]["title"].as_str(), Some("Inventory"));
        assert!(doc["paths"].is_mapping());
    }

    #[test]
    fn test_rewrite_servers_flow_style_list() {
        let base = Url::parse("https://inventory.example.com").unwrap();
        let spec = "openapi: 3.0.1\nservers: [{url: 'http://localhost:8000'}]\npaths: {}\n";
        let rewritten = rewrite_servers(spec, &base).unwrap();
        assert_eq!(servers_of(&rewritten), vec!["https://inventory.example.com"]);
    }

    #[test]
    fn test_rewrite_servers_url_not_first_key() {
        let base = Url::parse("https://inventory.example.com").unwrap();
        let spec = "openapi: 3.0.1\nservers:\n  - description: local\n    url: http://localhost:8000\n  - url: http://staging:8000\npaths: {}\n";
        let rewritten = rewrite_servers(spec, &base).unwrap();
        assert_eq!(servers_of(&rewritten), vec!["https://inventory.example.com"]);
        assert!(!rewritten.contains("staging"));
    }

    #[test]
    fn test_rewrite_servers_adds_missing_key() {
        let base = Url::parse("https://inventory.example.com").unwrap();
        let spec = "openapi: 3.0.1\npaths:\n  /x:\n    get: {}\n";
        let rewritten = rewrite_servers(spec, &base).unwrap();
        assert_eq!(servers_of(&rewritten), vec!["https://inventory.example.com"]);

        let doc: YamlValue = serde_yaml::from_str(&rewritten).unwrap();
        assert!(doc["paths"]["/x"]["get"].is_mapping());
    }

    #[test]
    fn test_rewrite_servers_rejects_non_mapping() {
        let base = Url::parse("https://inventory.example.com").unwrap();
        assert!(rewrite_servers("- just\n- a list\n", &base).is_err());
        assert!(rewrite_servers("servers: [unclosed", &base).is_err());
    }

    #[actix_web::test]
    async fn test_hello() {
        let app = test::init_service(App::new().service(hello)).await;
        let req = test::TestRequest::get().uri("/hello").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Hello, Evans!");
    }

    #[actix_web::test]
    async fn test_documents_served_verbatim_without_base_url() {
        let temp_dir = tempdir().unwrap();
        write_docs(temp_dir.path());
        let app = test::init_service(
            App::new().app_data(test_support::state(temp_dir.path(), None)).configure(configure)
        ).await;

        let req = test::TestRequest::get().uri("/openapi.yaml").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(&body[..], SPEC.as_bytes());

        let req = test::TestRequest::get().uri("/plugin_manifest.json").to_request();
        let manifest: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(manifest["api"]["url"], "http://localhost:8000/openapi.yaml");
    }

    #[actix_web::test]
    async fn test_documents_follow_base_url() {
        let temp_dir = tempdir().unwrap();
        write_docs(temp_dir.path());
        let state = test_support::state(temp_dir.path(), Some("https://inventory.example.com"));
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/openapi.yaml").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let spec = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(servers_of(&spec), vec!["https://inventory.example.com"]);

        let req = test::TestRequest::get().uri("/plugin_manifest.json").to_request();
        let manifest: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(manifest["api"]["url"], "https://inventory.example.com/openapi.yaml");
        assert_eq!(manifest["name_for_model"], "inventory");
    }

    #[actix_web::test]
    async fn test_missing_documents_are_404() {
        let temp_dir = tempdir().unwrap();
        let app = test::init_service(
            App::new().app_data(test_support::state(temp_dir.path(), None)).configure(configure)
        ).await;

        let req = test::TestRequest::get().uri("/openapi.yaml").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
