use criterion::{criterion_group, criterion_main, Criterion};
use http::Method;
use msrv_router::handler::{handler_fn, HandlerResponse};
use msrv_router::request::Request;
use msrv_router::routes::{RouteTable, TableFormat};
use msrv_router::{registry::HandlerRegistry, router::Router};
use std::hint::black_box;

fn example_table() -> &'static str {
    r#"
base_path = "/api"

[[routes]]
method = "GET"
path = "player"
handler = "get_player"

[[routes]]
method = "POST"
path = "player/play/:plref/:index"
handler = "play_item"

[[routes]]
method = "GET"
path = "playlists"
handler = "get_playlists"

[[routes]]
method = "GET"
path = "playlists/:plref/items/:range"
handler = "get_items"

[[routes]]
method = "POST"
path = "playlists/:plref/items/move"
handler = "move_items"

[[routes]]
method = "GET"
path = "artwork/:plref/:index"
handler = "get_artwork"

[[routes]]
method = "GET"
path = "browser/entries/:path*"
handler = "browse"
"#
}

fn build_router() -> Router {
    let table = RouteTable::parse(example_table(), TableFormat::Toml).unwrap();
    let mut registry = HandlerRegistry::new();
    for def in &table.routes {
        registry.register(
            &def.handler,
            handler_fn(|_, _| HandlerResponse::ok(serde_json::Value::Null)),
        );
    }
    table.build_router(&registry).unwrap()
}

fn bench_dispatch_throughput(c: &mut Criterion) {
    let router = build_router();
    let requests = [
        Request::new(Method::GET, "/api/player"),
        Request::new(Method::POST, "/api/player/play/p1/12"),
        Request::new(Method::GET, "/api/playlists/p3/items/0:100"),
        Request::new(Method::POST, "/api/playlists/p3/items/move"),
        Request::new(Method::GET, "/api/browser/entries/music/artist/album/track.flac"),
        Request::new(Method::GET, "/api/nonexistent"),
    ];
    c.bench_function("dispatch", |b| {
        b.iter(|| {
            for request in &requests {
                let res = router.dispatch(request);
                black_box(&res);
            }
        })
    });
}

criterion_group!(benches, bench_dispatch_throughput);
criterion_main!(benches);
