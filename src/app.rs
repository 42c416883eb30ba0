use std::net::SocketAddr;
use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;
use crate::session::require_session;
use crate::state::AppState;
use crate::{auth, density, export, guests};

pub fn build_app(state: AppState) -> Router {
    let protected = Router::new()
        .merge(auth::protected_router())
        .merge(guests::router())
        .merge(density::router())
        .merge(export::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .merge(auth::public_router())
        .merge(protected)
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::temp_database;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn send(app: &Router, req: Request<Body>) -> Response {
        app.clone().oneshot(req).await.expect("infallible")
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).expect("request")
    }

    fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_owned())).expect("request")
    }

    /// `name=value` part of the Set-Cookie header.
    fn session_cookie(res: &Response) -> String {
        let set_cookie = res
            .headers()
            .get(header::SET_COOKIE)
            .expect("set-cookie")
            .to_str()
            .expect("ascii");
        set_cookie.split(';').next().expect("pair").to_owned()
    }

    fn location(res: &Response) -> &str {
        res.headers()
            .get(header::LOCATION)
            .expect("location")
            .to_str()
            .expect("ascii")
    }

    async fn json(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn flash_messages(page: &Value) -> Vec<&str> {
        page["flashes"]
            .as_array()
            .map(|flashes| flashes.iter().filter_map(|f| f["message"].as_str()).collect())
            .unwrap_or_default()
    }

    async fn logged_in(app: &Router) -> String {
        let res = send(app, post_form("/kayit_ol", "kullanici_adi=resepsiyon&sifre=gizli", None)).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let res = send(app, post_form("/giris", "kullanici_adi=resepsiyon&sifre=gizli", None)).await;
        assert_eq!(location(&res), "/ana_kayitlar");
        session_cookie(&res)
    }

    #[tokio::test]
    async fn protected_route_without_session_redirects_to_login() {
        let (_dir, db) = temp_database().await;
        let app = build_app(AppState::fake(db));

        let res = send(&app, get("/kayitlar_sayfasi", None)).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/");

        let cookie = session_cookie(&res);
        let page = json(send(&app, get("/", Some(&cookie))).await).await;
        assert_eq!(page["page"], "giris");
        assert_eq!(page["flashes"][0]["category"], "danger");
    }

    #[tokio::test]
    async fn forged_cookie_is_treated_as_anonymous() {
        let (_dir, db) = temp_database().await;
        let app = build_app(AppState::fake(db));

        let res = send(&app, get("/ana_kayitlar", Some("otel_session=a.b.c"))).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/");
    }

    #[tokio::test]
    async fn wrong_password_redirects_back_with_flash() {
        let (_dir, db) = temp_database().await;
        let app = build_app(AppState::fake(db));
        send(&app, post_form("/kayit_ol", "kullanici_adi=resepsiyon&sifre=gizli", None)).await;

        let res = send(&app, post_form("/giris", "kullanici_adi=resepsiyon&sifre=yanlis", None)).await;
        assert_eq!(location(&res), "/");
        let cookie = session_cookie(&res);
        let res = send(&app, get("/ana_kayitlar", Some(&cookie))).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn duplicate_registration_flashes_and_redirects() {
        let (_dir, db) = temp_database().await;
        let app = build_app(AppState::fake(db));
        send(&app, post_form("/kayit_ol", "kullanici_adi=resepsiyon&sifre=gizli", None)).await;

        let res = send(&app, post_form("/kayit_ol", "kullanici_adi=resepsiyon&sifre=baska", None)).await;
        assert_eq!(location(&res), "/kayit_ol");
        let cookie = session_cookie(&res);
        let page = json(send(&app, get("/kayit_ol", Some(&cookie))).await).await;
        assert_eq!(page["flashes"][0]["message"], "Bu kullanıcı adı zaten mevcut.");
    }

    #[tokio::test]
    async fn guest_lifecycle_through_http() {
        let (_dir, db) = temp_database().await;
        let app = build_app(AppState::fake(db));
        let cookie = logged_in(&app).await;

        let res = send(
            &app,
            post_form(
                "/kayit",
                "ad=Ay%C5%9Fe&soyad=Kaya&ziyaret_tarihi=2024-05-01T10%3A00&oda_no=204",
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(location(&res), "/kayitlar_sayfasi");

        let page = json(send(&app, get("/kayitlar_sayfasi", Some(&cookie))).await).await;
        let guests = page["data"]["ziyaretciler"].as_array().expect("guest list");
        assert_eq!(guests.len(), 1);
        assert_eq!(guests[0]["ad"], "Ayşe");
        assert_eq!(guests[0]["telefon"], "");
        let id = guests[0]["id"].as_i64().expect("id");

        let res = send(
            &app,
            post_form("/filtreleme", "ad=Ay&soyad=&giris_tarihi=2024-05&cikis_tarihi=", Some(&cookie)),
        )
        .await;
        let page = json(res).await;
        assert_eq!(page["data"]["ziyaretciler"].as_array().map(Vec::len), Some(1));

        let page = json(send(&app, get("/ziyaretci_yogunluk_sayfasi", Some(&cookie))).await).await;
        assert_eq!(page["data"]["gunluk_yogunluk"][0]["period"], "2024-05-01");
        assert_eq!(page["data"]["gunluk_yogunluk"][0]["count"], 1);

        let res = send(&app, get("/export_json", Some(&cookie))).await;
        assert_eq!(
            res.headers().get(header::CONTENT_DISPOSITION).expect("disposition"),
            "attachment; filename=\"misafir_kayitlari.json\""
        );
        let exported = json(res).await;
        assert_eq!(exported.as_array().map(Vec::len), Some(1));

        let res = send(&app, post_form(&format!("/sil_ziyaretci/{id}"), "", Some(&cookie))).await;
        assert_eq!(location(&res), "/kayitlar_sayfasi");
        let res = send(&app, get(&format!("/duzenle_ziyaretci/{id}"), Some(&cookie))).await;
        assert_eq!(location(&res), "/kayitlar_sayfasi");
    }

    #[tokio::test]
    async fn update_via_form_overwrites_and_blanks_omitted_fields() {
        let (_dir, db) = temp_database().await;
        let app = build_app(AppState::fake(db));
        let cookie = logged_in(&app).await;

        send(
            &app,
            post_form(
                "/kayit",
                "ad=Mehmet&soyad=Demir&telefon=05551234567&ziyaret_tarihi=2024-05-01T10%3A00&oda_no=101",
                Some(&cookie),
            ),
        )
        .await;
        let page = json(send(&app, get("/kayitlar_sayfasi", Some(&cookie))).await).await;
        let id = page["data"]["ziyaretciler"][0]["id"].as_i64().expect("id");

        let res = send(
            &app,
            post_form(
                "/kayit",
                &format!("misafir_id={id}&ad=Mehmet+Ali&ziyaret_tarihi=2024-05-02T09%3A30"),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/kayitlar_sayfasi");
        let cookie = session_cookie(&res);

        let res = send(&app, get(&format!("/duzenle_ziyaretci/{id}"), Some(&cookie))).await;
        assert_eq!(res.status(), StatusCode::OK);
        let page = json(res).await;
        assert_eq!(page["page"], "ziyaretci_kayit");
        assert!(flash_messages(&page).contains(&"Misafir bilgileri başarıyla güncellendi!"));
        let guest = &page["data"]["misafir"];
        assert_eq!(guest["id"], id);
        assert_eq!(guest["ad"], "Mehmet Ali");
        assert_eq!(guest["giris_tarihi_saati"], "2024-05-02T09:30");
        assert_eq!(guest["soyad"], "");
        assert_eq!(guest["telefon"], "");
        assert_eq!(guest["oda_no"], "");
    }

    #[tokio::test]
    async fn update_of_missing_id_flashes_not_found() {
        let (_dir, db) = temp_database().await;
        let app = build_app(AppState::fake(db));
        let cookie = logged_in(&app).await;

        let res = send(
            &app,
            post_form("/kayit", "misafir_id=999&ad=Yok&ziyaret_tarihi=2024-05-01T10%3A00", Some(&cookie)),
        )
        .await;
        assert_eq!(location(&res), "/kayitlar_sayfasi");
        let cookie = session_cookie(&res);

        let page = json(send(&app, get("/kayitlar_sayfasi", Some(&cookie))).await).await;
        assert!(flash_messages(&page).contains(&"Misafir bulunamadı."));
        assert_eq!(page["data"]["ziyaretciler"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn non_numeric_path_id_flashes_not_found() {
        let (_dir, db) = temp_database().await;
        let app = build_app(AppState::fake(db));
        let cookie = logged_in(&app).await;

        let res = send(&app, get("/duzenle_ziyaretci/abc", Some(&cookie))).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/kayitlar_sayfasi");
        let edit_cookie = session_cookie(&res);
        let page = json(send(&app, get("/kayitlar_sayfasi", Some(&edit_cookie))).await).await;
        assert!(flash_messages(&page).contains(&"Misafir bulunamadı."));

        let res = send(&app, post_form("/sil_ziyaretci/abc", "", Some(&cookie))).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/kayitlar_sayfasi");
        let delete_cookie = session_cookie(&res);
        let page = json(send(&app, get("/kayitlar_sayfasi", Some(&delete_cookie))).await).await;
        assert!(flash_messages(&page).contains(&"Misafir bulunamadı."));
    }

    #[tokio::test]
    async fn login_page_redirects_when_logged_in() {
        let (_dir, db) = temp_database().await;
        let app = build_app(AppState::fake(db));
        let cookie = logged_in(&app).await;

        let res = send(&app, get("/", Some(&cookie))).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/ana_kayitlar");
    }

    #[tokio::test]
    async fn logout_drops_the_marker() {
        let (_dir, db) = temp_database().await;
        let app = build_app(AppState::fake(db));
        let cookie = logged_in(&app).await;

        let page = json(send(&app, get("/ana_kayitlar", Some(&cookie))).await).await;
        assert_eq!(page["data"]["username"], "resepsiyon");

        let res = send(&app, get("/cikis_yap", Some(&cookie))).await;
        assert_eq!(location(&res), "/");
        let cookie = session_cookie(&res);
        let res = send(&app, get("/ana_kayitlar", Some(&cookie))).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn health_is_public() {
        let (_dir, db) = temp_database().await;
        let app = build_app(AppState::fake(db));
        let res = send(&app, get("/health", None)).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
