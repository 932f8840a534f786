mod common;

use common::temp_files::create_temp_table;
use common::tagged;
use http::Method;
use msrv_router::host::{ControlSurface, Lifecycle, SurfaceSettings};
use msrv_router::registry::HandlerRegistry;
use msrv_router::request::Request;
use msrv_router::router::Router;
use msrv_router::runtime_config::RuntimeConfig;
use std::time::Duration;

fn data_router() -> Router {
    let mut router = Router::new();
    router.define_route(Method::GET, "data", tagged("get_data")).unwrap();
    router.define_route(Method::POST, "data", tagged("post_data")).unwrap();
    router
        .define_route(Method::GET, "playlists/:plref", tagged("playlist"))
        .unwrap();
    router
}

#[test]
fn test_surface_runs_matched_handler() {
    let surface = ControlSurface::new(data_router(), SurfaceSettings::default());
    let response = surface.handle(&Request::new(Method::GET, "/playlists/p7"));
    assert_eq!(response.status, 200);
    assert_eq!(response.body["tag"], "playlist");
    assert_eq!(response.body["params"]["plref"], "p7");
}

#[test]
fn test_surface_defaults_to_not_found() {
    let surface = ControlSurface::new(data_router(), SurfaceSettings::default());
    assert_eq!(surface.handle(&Request::new(Method::GET, "/nonexistent")).status, 404);
    assert_eq!(surface.handle(&Request::new(Method::DELETE, "/data")).status, 404);
}

#[test]
fn test_surface_method_not_allowed_when_enabled() {
    let settings = SurfaceSettings {
        method_not_allowed: true,
    };
    let surface = ControlSurface::new(data_router(), settings);

    let response = surface.handle(&Request::new(Method::DELETE, "/data"));
    assert_eq!(response.status, 405);
    assert_eq!(response.body["allowed"], serde_json::json!(["GET", "POST"]));

    assert_eq!(surface.handle(&Request::new(Method::GET, "/nonexistent")).status, 404);
}

#[test]
fn test_surface_shared_across_threads() {
    let surface = ControlSurface::new(data_router(), SurfaceSettings::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let surface = surface.clone();
            std::thread::spawn(move || {
                let path = format!("/playlists/p{i}");
                surface.handle(&Request::new(Method::GET, path)).body["params"]["plref"].clone()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), serde_json::json!(format!("p{i}")));
    }
}

#[test]
fn test_lifecycle_init_and_quit() {
    let table = r#"
[[routes]]
method = "GET"
path = "player"
handler = "get_player"
"#;
    let file = create_temp_table(table, "toml");
    let config = RuntimeConfig {
        routes_file: Some(file.path().to_path_buf()),
        method_not_allowed: true,
        slow_dispatch: Duration::from_millis(5),
    };

    let mut registry = HandlerRegistry::new();
    registry.register("get_player", tagged("get_player"));

    let mut lifecycle = Lifecycle::new(config, registry);
    assert!(lifecycle.surface().is_none());
    assert!(lifecycle.on_init());

    let surface = lifecycle.surface().unwrap().clone();
    assert!(surface.settings().method_not_allowed);
    assert_eq!(surface.handle(&Request::new(Method::GET, "/player")).status, 200);
    assert_eq!(surface.handle(&Request::new(Method::POST, "/player")).status, 405);

    lifecycle.on_quit();
    assert!(lifecycle.surface().is_none());
    // A clone taken before quit keeps serving until dropped.
    assert_eq!(surface.handle(&Request::new(Method::GET, "/player")).status, 200);
}

#[test]
fn test_lifecycle_init_failure_is_contained() {
    let table = r#"
[[routes]]
method = "GET"
path = "player"
handler = "missing"
"#;
    let file = create_temp_table(table, "toml");
    let config = RuntimeConfig {
        routes_file: Some(file.path().to_path_buf()),
        ..RuntimeConfig::default()
    };

    let mut lifecycle = Lifecycle::new(config, HandlerRegistry::new());
    assert!(!lifecycle.on_init());
    assert!(lifecycle.surface().is_none());
    lifecycle.on_quit();
}

#[test]
fn test_lifecycle_without_route_table() {
    let mut lifecycle = Lifecycle::new(RuntimeConfig::default(), HandlerRegistry::new());
    assert!(lifecycle.on_init());
    let surface = lifecycle.surface().unwrap();
    assert!(surface.router().routes().is_empty());
    assert_eq!(surface.handle(&Request::new(Method::GET, "/")).status, 404);
}
