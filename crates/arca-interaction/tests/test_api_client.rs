use arca_core::library::{LibraryBackend, NewPhysicalBook};
use arca_core::note::NewNote;
use arca_interaction::ArcaApiClient;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn lists_are_typed_through_the_backend_seam() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/libros/digitales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "nombre_archivo": "owen.pdf",
                "formato": "pdf",
                "titulo": "La mortificación del pecado"
            }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/libros/fisicos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 9, "titulo": "El progreso del peregrino", "leido": true }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/notas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = ArcaApiClient::new(server.uri());

    let books = client.list_digital_books().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].display_title(), "La mortificación del pecado");

    let physical = client.list_physical_books().await.unwrap();
    assert_eq!(physical[0].leido, Some(true));

    assert!(client.list_notes(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn background_jobs_use_post() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/libros/digitales/escanear"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mensaje": "Escaneo local iniciado en segundo plano."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/libros/digitales/sincronizar-drive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mensaje": "Sincronización con Google Drive iniciada en segundo plano."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ArcaApiClient::new(server.uri());
    assert!(client.books().scan().await.unwrap().mensaje.starts_with("Escaneo"));
    assert!(client.books().sync_drive().await.unwrap().mensaje.contains("Drive"));
    server.verify().await;
}

#[tokio::test]
async fn physical_book_lookup_and_creation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/libros/fisicos/isbn/9780851519883"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "titulo": "The Mortification of Sin",
            "autor": "John Owen",
            "editorial": "Banner of Truth",
            "ano_publicacion": "2004",
            "categoria": "General"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/libros/fisicos"))
        .and(body_json(json!({
            "titulo": "The Mortification of Sin",
            "isbn": "9780851519883",
            "autor": "John Owen",
            "editorial": "Banner of Truth",
            "ano_publicacion": 2004,
            "categoria": "General"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "titulo": "The Mortification of Sin",
            "isbn": "9780851519883",
            "fecha_agregado": "2024-05-01T10:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ArcaApiClient::new(server.uri());
    let lookup = client
        .physical_books()
        .lookup_isbn("9780851519883")
        .await
        .unwrap();
    let created = client
        .physical_books()
        .create(&NewPhysicalBook::from_lookup("9780851519883", &lookup))
        .await
        .unwrap();

    assert_eq!(created.id, 12);
    server.verify().await;
}

#[tokio::test]
async fn note_mutations_hit_templated_paths() {
    let server = MockServer::start().await;
    let note = NewNote::new("Salmo 23", "<p>Jehová es mi pastor</p>");

    Mock::given(method("POST"))
        .and(path("/notas"))
        .and(body_json(json!({
            "titulo": "Salmo 23",
            "contenido_html": "<p>Jehová es mi pastor</p>"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "titulo": "Salmo 23", "contenido_html": "<p>Jehová es mi pastor</p>"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/notas/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "titulo": "Salmo 23", "contenido_html": "<p>nada me faltará</p>"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/notas/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "mensaje": "Nota eliminada correctamente" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/notas"))
        .and(query_param("user_id", "ana@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ArcaApiClient::new(server.uri());
    let created = client.notes().create(&note).await.unwrap();
    let updated = client
        .notes()
        .update(created.id, &NewNote::new("Salmo 23", "<p>nada me faltará</p>"))
        .await
        .unwrap();
    let deleted = client.notes().delete(updated.id).await.unwrap();
    let mine = client.notes().list_for_user("ana@example.com").await.unwrap();

    assert_eq!(deleted.mensaje, "Nota eliminada correctamente");
    assert!(mine.is_empty());
    server.verify().await;
}

#[tokio::test]
async fn owned_note_mutations_carry_user_id() {
    let server = MockServer::start().await;
    let owner = "ana@example.com";

    Mock::given(method("POST"))
        .and(path("/notas"))
        .and(query_param("user_id", owner))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 21, "titulo": "Salmo 1", "contenido_html": "<p>Bienaventurado</p>"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/notas/21"))
        .and(query_param("user_id", owner))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 21, "titulo": "Salmo 1", "contenido_html": "<p>varón</p>"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/notas/21"))
        .and(query_param("user_id", owner))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "mensaje": "Nota eliminada correctamente" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/notas"))
        .and(query_param("user_id", owner))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 21, "titulo": "Salmo 1", "contenido_html": "<p>varón</p>" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ArcaApiClient::new(server.uri());
    let created = client
        .create_note(Some(owner), &NewNote::new("Salmo 1", "<p>Bienaventurado</p>"))
        .await
        .unwrap();
    client
        .update_note(Some(owner), created.id, &NewNote::new("Salmo 1", "<p>varón</p>"))
        .await
        .unwrap();
    let listed = client.list_notes(Some(owner)).await.unwrap();
    client.delete_note(Some(owner), created.id).await.unwrap();

    assert_eq!(listed.len(), 1);
    server.verify().await;

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.query() == Some("user_id=ana%40example.com")));
}

#[tokio::test]
async fn dictionary_lookup_encodes_term_and_defaults_perspective() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/diccionario/gracia%20com%C3%BAn"))
        .and(query_param("perspectiva", "reformado"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "termino": "gracia común",
            "definicion": "El favor general de Dios hacia toda la humanidad."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/diccionario/kenosis"))
        .and(query_param("perspectiva", "academico"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "termino": "kenosis",
            "definicion": "Vaciamiento (Filipenses 2:7)."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ArcaApiClient::new(server.uri());
    let entry = client.dictionary().lookup("gracia común", None).await.unwrap();
    assert_eq!(entry.termino, "gracia común");

    let entry = client
        .dictionary()
        .lookup("kenosis", Some("academico"))
        .await
        .unwrap();
    assert!(entry.definicion.contains("Filipenses"));
    server.verify().await;
}

#[tokio::test]
async fn assistant_question_is_wrapped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/preguntar"))
        .and(body_json(json!({ "pregunta": "¿Qué es la justificación?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "respuesta": "Es el acto de Dios...",
            "fuentes": [{ "titulo": "Institución" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ArcaApiClient::new(server.uri());
    let answer = client
        .assistant()
        .ask("¿Qué es la justificación?")
        .await
        .unwrap();

    assert_eq!(answer.respuesta, "Es el acto de Dios...");
    assert_eq!(answer.fuentes.len(), 1);
}

#[tokio::test]
async fn system_status_and_diagnostics() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "estado": "en línea",
            "mensaje": "El Arca 2.0 está operativa",
            "version": "2.1.0"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sistema/diagnostico"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "base_datos": "conectada",
            "google_drive": { "estado": "error", "mensaje": "Faltan credenciales" }
        })))
        .mount(&server)
        .await;

    let client = ArcaApiClient::new(server.uri());
    assert_eq!(client.system().status().await.unwrap().version, "2.1.0");

    let diagnostics = client.system().diagnostics().await.unwrap();
    assert_eq!(diagnostics.component_status("google_drive").as_deref(), Some("error"));
}

#[test]
fn view_url_is_built_without_a_request() {
    let client = ArcaApiClient::new("http://127.0.0.1:8000/");
    assert_eq!(
        client.books().view_url("1AbC-xyz"),
        "http://127.0.0.1:8000/libros/ver/1AbC-xyz"
    );
}
