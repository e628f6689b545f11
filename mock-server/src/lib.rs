//! In-memory mock of the document-search HTTP API.
//!
//! Serves the endpoint shapes the client speaks — `{type}`, `{type}/{id}`,
//! `{type}/{id}/_update`, `{type}/{id}/` and `{types}/_bulk` under an app
//! namespace — over a `HashMap` keyed by (app, type, id). Responses follow
//! the service's envelope (`_index`, `_type`, `_id`, `result`) and echo the
//! submitted document under `_source` so tests can verify round-trips.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub type Db = Arc<RwLock<HashMap<(String, String, String), Value>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/{index}/_bulk", post(bulk_all_types))
        .route("/{index}/{doc_type}", post(index_auto_id))
        .route("/{index}/{doc_type}/_bulk", post(bulk))
        .route("/{index}/{doc_type}/{id}", put(index_with_id))
        .route("/{index}/{doc_type}/{id}/", delete(delete_doc))
        .route("/{index}/{doc_type}/{id}/_update", post(update_doc))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn index_auto_id(
    State(db): State<Db>,
    Path((index, doc_type)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let id = Uuid::new_v4().to_string();
    db.write()
        .await
        .insert((index.clone(), doc_type.clone(), id.clone()), body.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "_index": index,
            "_type": doc_type,
            "_id": id,
            "result": "created",
            "_source": body,
        })),
    )
}

async fn index_with_id(
    State(db): State<Db>,
    Path((index, doc_type, id)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let previous = db
        .write()
        .await
        .insert((index.clone(), doc_type.clone(), id.clone()), body.clone());
    let (status, result) = match previous {
        Some(_) => (StatusCode::OK, "updated"),
        None => (StatusCode::CREATED, "created"),
    };
    (
        status,
        Json(json!({
            "_index": index,
            "_type": doc_type,
            "_id": id,
            "result": result,
            "_source": body,
        })),
    )
}

async fn update_doc(
    State(db): State<Db>,
    Path((index, doc_type, id)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut docs = db.write().await;
    let Some(doc) = docs.get_mut(&(index.clone(), doc_type.clone(), id.clone())) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "document_missing", "_id": id})),
        );
    };

    // Partial update: merge the entry's "doc" object into the stored document.
    if let (Some(target), Some(fields)) = (doc.as_object_mut(), body.get("doc").and_then(Value::as_object)) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }

    (
        StatusCode::OK,
        Json(json!({
            "_index": index,
            "_type": doc_type,
            "_id": id,
            "result": "updated",
        })),
    )
}

async fn delete_doc(
    State(db): State<Db>,
    Path((index, doc_type, id)): Path<(String, String, String)>,
) -> (StatusCode, Json<Value>) {
    let removed = db.write().await.remove(&(index.clone(), doc_type.clone(), id.clone()));
    match removed {
        Some(_) => (
            StatusCode::OK,
            Json(json!({
                "_index": index,
                "_type": doc_type,
                "_id": id,
                "result": "deleted",
            })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "_index": index,
                "_type": doc_type,
                "_id": id,
                "result": "not_found",
            })),
        ),
    }
}

async fn bulk(
    Path((_index, doc_types)): Path<(String, String)>,
    Json(entries): Json<Vec<Value>>,
) -> Json<Value> {
    bulk_response(doc_types.split(',').count(), entries)
}

async fn bulk_all_types(
    Path(_index): Path<String>,
    Json(entries): Json<Vec<Value>>,
) -> Json<Value> {
    bulk_response(0, entries)
}

fn bulk_response(type_count: usize, entries: Vec<Value>) -> Json<Value> {
    Json(json!({
        "took": 1,
        "errors": false,
        "types": type_count,
        "items": entries,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_response_echoes_entries() {
        let entries = vec![json!({"index": {"_id": "1"}}), json!({"field1": "value1"})];
        let Json(value) = bulk_response(2, entries.clone());
        assert_eq!(value["errors"], false);
        assert_eq!(value["items"], Value::Array(entries));
    }

    #[test]
    fn bulk_response_with_no_types() {
        let Json(value) = bulk_response(0, Vec::new());
        assert_eq!(value["types"], 0);
        assert_eq!(value["items"], json!([]));
    }
}
