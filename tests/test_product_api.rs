//! Integration tests for the product API: CRUD contract, validation
//! aggregation, duplicate-name rule, and multipart uploads.
//!
//! Each test spins the router up on an ephemeral port over an in-memory
//! document store seeded with the demo catalog, and drives it with reqwest.

use productos_apirest::domain::model::{Categoria, Producto};
use productos_apirest::storage::blob::fs::FsBlobStore;
use productos_apirest::storage::document::memory::MemoryDocumentStore;
use productos_apirest::transport;
use productos_apirest::CatalogService;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    service: Arc<CatalogService>,
    uploads_dir: tempfile::TempDir,
}

async fn spawn_app() -> Result<TestApp, Box<dyn std::error::Error>> {
    let productos = Arc::new(MemoryDocumentStore::<Producto>::new());
    let categorias = Arc::new(MemoryDocumentStore::<Categoria>::new());
    let service = Arc::new(CatalogService::new(productos, categorias));
    service.seed_demo_data().await?;

    let uploads_dir = tempfile::tempdir()?;
    let uploads = Arc::new(FsBlobStore::new(uploads_dir.path()).await?);

    let app_state = transport::http::AppState {
        service: service.clone(),
        uploads,
    };
    let router = transport::http::create_router(app_state);

    // Bind to an ephemeral port to avoid conflicts with a running server.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Ok(TestApp {
        base_url: format!("http://127.0.0.1:{}/api/productos", port),
        service,
        uploads_dir,
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_listar() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let client = reqwest::Client::new();

    let response = client.get(&app.base_url).send().await?;
    assert_eq!(response.status().as_u16(), 200);
    let productos: Vec<Producto> = response.json().await?;
    assert_eq!(productos.len(), 6);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_listar_stream() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/stream", app.base_url))
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/x-ndjson")
    );

    let body = response.text().await?;
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 6);
    for line in lines {
        let producto: Producto = serde_json::from_str(line)?;
        assert!(producto.id.is_some());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_categorias_sembradas() -> Result<(), Box<dyn std::error::Error>> {
    use futures::TryStreamExt;

    let app = spawn_app().await?;

    let categorias: Vec<Categoria> = app.service.find_all_categorias().try_collect().await?;
    assert_eq!(categorias.len(), 4);

    let c2 = app.service.find_categoria_by_nombre("C2").await?.unwrap();
    let releida = app
        .service
        .find_categoria_by_id(c2.id.as_deref().unwrap())
        .await?
        .unwrap();
    assert_eq!(releida.nombre, "C2");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_ver() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let client = reqwest::Client::new();

    let producto = app.service.find_by_nombre("tv 6").await?.unwrap();
    let response = client
        .get(format!("{}/{}", app.base_url, producto.id.as_deref().unwrap()))
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 200);
    let encontrado: Producto = response.json().await?;
    assert!(!encontrado.id.as_deref().unwrap().is_empty());
    assert_eq!(encontrado.nombre, "tv 6");

    let response = client
        .get(format!("{}/{}", app.base_url, Uuid::new_v4()))
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 404);
    assert!(response.text().await?.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_crear() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let client = reqwest::Client::new();

    let categoria = app.service.find_categoria_by_nombre("C2").await?.unwrap();
    let response = client
        .post(&app.base_url)
        .json(&json!({
            "nombre": "tv 100",
            "precio": 1000.34,
            "categoria": categoria
        }))
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 201);

    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let creado: Producto = response.json().await?;
    let id = creado.id.as_deref().unwrap();
    assert!(!id.is_empty());
    assert_eq!(location.as_deref(), Some(format!("/api/productos/{}", id).as_str()));
    assert_eq!(creado.nombre, "tv 100");
    assert_eq!(creado.categoria.as_ref().unwrap().nombre, "C2");
    assert!(creado.create_at.is_some());

    // The persisted record is visible through the read endpoint.
    let response = client.get(format!("{}/{}", app.base_url, id)).send().await?;
    assert_eq!(response.status().as_u16(), 200);
    let visto: Producto = response.json().await?;
    assert_eq!(visto.nombre, "tv 100");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_crear_invalido() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let client = reqwest::Client::new();

    let response = client.post(&app.base_url).json(&json!({})).send().await?;
    assert_eq!(response.status().as_u16(), 400);

    let errores: Vec<String> = response.json().await?;
    assert!(!errores.is_empty());
    assert!(errores.contains(&"El campo nombre must not be empty".to_string()));
    assert!(errores.contains(&"El campo precio must not be null".to_string()));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_crear_duplicado() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let client = reqwest::Client::new();

    // "tv 6" is part of the seeded catalog; the duplicate is reported as a
    // 200 soft error, not a conflict status.
    let response = client
        .post(&app.base_url)
        .json(&json!({"nombre": "tv 6", "precio": 1.0}))
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await?;
    assert_eq!(body["errors"], "Producto ya existe");
    assert!(body.get("timestamp").is_some());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_editar() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let client = reqwest::Client::new();

    let producto = app.service.find_by_nombre("tv 3").await?.unwrap();
    let id = producto.id.as_deref().unwrap();
    let categoria = app.service.find_categoria_by_nombre("C4").await?.unwrap();

    let response = client
        .put(format!("{}/{}", app.base_url, id))
        .json(&json!({
            "nombre": "tv 200",
            "precio": 1000.34,
            "categoria": categoria
        }))
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 201);

    let editado: Producto = response.json().await?;
    assert_eq!(editado.id.as_deref(), Some(id));
    assert_eq!(editado.nombre, "tv 200");
    assert_eq!(editado.categoria.as_ref().unwrap().nombre, "C4");

    let response = client
        .put(format!("{}/{}", app.base_url, Uuid::new_v4()))
        .json(&json!({"nombre": "x", "precio": 1.0}))
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 404);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_eliminar() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let client = reqwest::Client::new();

    let producto = app.service.find_by_nombre("tv 5").await?.unwrap();
    let id = producto.id.clone().unwrap();

    let response = client
        .delete(format!("{}/{}", app.base_url, id))
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 204);
    assert!(response.text().await?.is_empty());

    let response = client.get(format!("{}/{}", app.base_url, id)).send().await?;
    assert_eq!(response.status().as_u16(), 404);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_upload() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let client = reqwest::Client::new();

    let producto = app.service.find_by_nombre("tv 1").await?.unwrap();
    let id = producto.id.as_deref().unwrap();

    let contenido = b"fake image bytes".to_vec();
    let part = reqwest::multipart::Part::bytes(contenido.clone())
        .file_name("logo spring: con\\espacios.png");
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = client
        .post(format!("{}/upload/{}", app.base_url, id))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 200);

    let actualizado: Producto = response.json().await?;
    let foto = actualizado.foto.as_deref().unwrap();
    assert!(foto.ends_with("-logospringconespacios.png"));
    let token = foto.trim_end_matches("-logospringconespacios.png");
    assert!(Uuid::parse_str(token).is_ok());

    // The blob landed under the generated name, with the exact bytes sent.
    let stored = std::fs::read(app.uploads_dir.path().join(foto))?;
    assert_eq!(stored, contenido);

    // And the record change is durable.
    let releido = app.service.find_by_id(id).await?.unwrap();
    assert_eq!(releido.foto.as_deref(), Some(foto));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_upload_producto_inexistente() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let client = reqwest::Client::new();

    let part = reqwest::multipart::Part::bytes(b"ignored".to_vec()).file_name("foto.png");
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = client
        .post(format!("{}/upload/{}", app.base_url, Uuid::new_v4()))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 404);

    // 404 happens before any blob write: the uploads root stays empty.
    assert_eq!(std::fs::read_dir(app.uploads_dir.path())?.count(), 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_crear_con_foto() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let client = reqwest::Client::new();

    let categoria = app.service.find_categoria_by_nombre("C1").await?.unwrap();
    let part = reqwest::multipart::Part::bytes(b"plasma pixels".to_vec())
        .file_name("nueva foto.png");
    let form = reqwest::multipart::Form::new()
        .text("nombre", "tv plasma")
        .text("precio", "999.99")
        .text("categoria.id", categoria.id.clone().unwrap())
        .text("categoria.nombre", categoria.nombre.clone())
        .part("file", part);

    let response = client
        .post(format!("{}/crear-con-foto", app.base_url))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 200);

    let creado: Producto = response.json().await?;
    assert!(!creado.id.as_deref().unwrap().is_empty());
    assert_eq!(creado.nombre, "tv plasma");
    assert_eq!(creado.precio, Some(999.99));
    assert_eq!(creado.categoria.as_ref().unwrap().nombre, "C1");
    assert!(creado.create_at.is_some());

    let foto = creado.foto.as_deref().unwrap();
    assert!(foto.ends_with("-nuevafoto.png"));
    assert!(app.uploads_dir.path().join(foto).exists());
    Ok(())
}
