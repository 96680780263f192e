//! End-to-end GetStar tests against a mock SOAP backend.

use std::time::{Duration, Instant};

use sclws_proxy::config::validation::validate_config;
use sclws_proxy::lifecycle::Shutdown;

mod common;

async fn get(base: &str, query: &[(&str, &str)]) -> (u16, String, String) {
    let res = common::client()
        .get(format!("{}/getstar", base))
        .query(query)
        .send()
        .await
        .expect("Proxy unreachable");
    let status = res.status().as_u16();
    let content_type = res
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    (status, content_type, res.text().await.unwrap())
}

#[tokio::test]
async fn test_tsv_success() {
    let (backend, captured) =
        common::start_mock_backend(200, common::soap_output("RA=1 2 3")).await;
    let shutdown = Shutdown::new();
    let base = common::start_proxy(common::proxy_config(backend), &shutdown).await;

    let (status, content_type, body) = get(&base, &[("star", "Vega"), ("format", "tsv")]).await;
    assert_eq!(status, 200);
    assert_eq!(content_type, "text/plain");
    assert_eq!(body, "RA=1 2 3");

    let requests = captured.lock().unwrap().clone();
    assert_eq!(requests.len(), 1, "exactly one backend attempt");
    assert!(requests[0].contains("<GetStar xmlns=\"urn:sclws\">"));
    assert!(requests[0].contains("<query>-objectName Vega -format tsv -scenario false</query>"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_default_query_and_encoded_tsv() {
    let (backend, captured) = common::start_mock_backend(
        200,
        common::soap_output("name\tV&#xA;HD 1234\t5.2&#xA;note: a &amp;lt; b"),
    )
    .await;
    let shutdown = Shutdown::new();
    let base = common::start_proxy(common::proxy_config(backend), &shutdown).await;

    let (status, content_type, body) = get(&base, &[("star", "HD 1234"), ("V", "5.2")]).await;
    assert_eq!(status, 200);
    assert_eq!(content_type, "text/plain");
    assert_eq!(body, "name\tV\nHD 1234\t5.2\nnote: a &lt; b");

    let requests = captured.lock().unwrap().clone();
    assert!(requests[0]
        .contains("<query>-objectName HD 1234 -format vot -scenario false -V 5.2</query>"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_votable_success() {
    let (backend, _) = common::start_mock_backend(
        200,
        common::soap_output(
            "&lt;?xml version=\"1.0\"?&gt;&#xA;&lt;VOTABLE version=\"1.1\"&gt;&lt;RESOURCE/&gt;&lt;/VOTABLE&gt;",
        ),
    )
    .await;
    let shutdown = Shutdown::new();
    let base = common::start_proxy(common::proxy_config(backend), &shutdown).await;

    let (status, content_type, body) = get(&base, &[("star", "Vega")]).await;
    assert_eq!(status, 200);
    assert_eq!(content_type, "text/xml");
    assert_eq!(
        body,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <?xml-stylesheet href=\"./getstarVOTableToHTML.xsl\" type=\"text/xsl\"?>\
         <VOTABLE version=\"1.1\"><RESOURCE/></VOTABLE>"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_backend_fault() {
    let (backend, _) =
        common::start_mock_backend(500, common::soap_fault("Object not found")).await;
    let shutdown = Shutdown::new();
    let base = common::start_proxy(common::proxy_config(backend), &shutdown).await;

    let (status, content_type, body) = get(&base, &[("star", "NoSuchStar")]).await;
    assert_eq!(status, 500);
    assert_eq!(content_type, "text/html");
    assert!(body.contains("The SearchCal Server returned the error:"));
    assert!(body.contains("Object not found"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_unrecognized_reply_is_unavailable() {
    let (backend, _) =
        common::start_mock_backend(502, "<html>Bad Gateway</html>".to_string()).await;
    let shutdown = Shutdown::new();
    let base = common::start_proxy(common::proxy_config(backend), &shutdown).await;

    let (status, content_type, body) = get(&base, &[("star", "Vega")]).await;
    assert_eq!(status, 500);
    assert_eq!(content_type, "text/html");
    assert!(body.contains("The SearchCal Server is probably down now."));
    assert!(!body.contains("Bad Gateway"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_backend_down_is_unavailable() {
    let backend = common::closed_port().await;
    let shutdown = Shutdown::new();
    let base = common::start_proxy(common::proxy_config(backend), &shutdown).await;

    let (status, content_type, body) = get(&base, &[("star", "Vega")]).await;
    assert_eq!(status, 500);
    assert_eq!(content_type, "text/html");
    assert!(body.contains("The SearchCal Server is probably down now."));

    shutdown.trigger();
}

#[tokio::test]
async fn test_backend_deadline_is_unavailable() {
    let backend = common::start_stalled_backend().await;
    let mut config = common::proxy_config(backend);
    config.backend.timeout_secs = 1;
    let shutdown = Shutdown::new();
    let base = common::start_proxy(config, &shutdown).await;

    let start = Instant::now();
    let (status, _, body) = get(&base, &[("star", "Vega")]).await;
    let elapsed = start.elapsed();

    assert_eq!(status, 500);
    assert!(body.contains("The SearchCal Server is probably down now."));
    assert!(elapsed >= Duration::from_millis(900), "returned before the deadline: {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(5), "deadline not enforced: {:?}", elapsed);

    shutdown.trigger();
}

#[tokio::test]
async fn test_tightest_request_timeout_still_renders_down_page() {
    let backend = common::start_stalled_backend().await;
    let mut config = common::proxy_config(backend);
    config.backend.timeout_secs = 1;
    config.timeouts.request_secs = 1;
    assert!(validate_config(&config).is_err(), "equal bounds must be rejected");

    config.timeouts.request_secs = 2;
    assert_eq!(validate_config(&config), Ok(()));
    let shutdown = Shutdown::new();
    let base = common::start_proxy(config, &shutdown).await;

    for _ in 0..3 {
        let (status, content_type, body) = get(&base, &[("star", "Vega")]).await;
        assert_eq!(status, 500);
        assert_eq!(content_type, "text/html");
        assert!(body.contains("The SearchCal Server is probably down now."));
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_star_skips_backend() {
    let (backend, captured) = common::start_mock_backend(200, common::soap_output("x")).await;
    let shutdown = Shutdown::new();
    let base = common::start_proxy(common::proxy_config(backend), &shutdown).await;

    for star in ["", "INTERNAL", "UNKNOWN", "No_name"] {
        let (status, content_type, body) = get(&base, &[("star", star)]).await;
        assert_eq!(status, 500, "star={:?}", star);
        assert_eq!(content_type, "text/html");
        assert!(body.contains(&format!("missing or invalid:\n<br/>'{}'", star)));
    }

    let (status, _, _) = get(&base, &[("format", "tsv")]).await;
    assert_eq!(status, 500);

    assert!(captured.lock().unwrap().is_empty(), "backend must not be called");

    shutdown.trigger();
}

#[tokio::test]
async fn test_operand_cannot_break_envelope() {
    let (backend, captured) = common::start_mock_backend(200, common::soap_output("ok")).await;
    let shutdown = Shutdown::new();
    let base = common::start_proxy(common::proxy_config(backend), &shutdown).await;

    let (status, _, _) = get(&base, &[("star", "a</query><x>&b")]).await;
    assert_eq!(status, 200);

    let requests = captured.lock().unwrap().clone();
    assert!(requests[0].contains("<query>-objectName a&lt;/query&gt;&lt;x&gt;&amp;b -format vot"));
    assert_eq!(requests[0].matches("</query>").count(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_fault_message_escaped_by_default() {
    let (backend, _) =
        common::start_mock_backend(500, common::soap_fault("<script>alert(1)</script>")).await;
    let shutdown = Shutdown::new();
    let base = common::start_proxy(common::proxy_config(backend), &shutdown).await;

    let (status, _, body) = get(&base, &[("star", "Vega")]).await;
    assert_eq!(status, 500);
    assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!body.contains("<script>"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_echoed() {
    let (backend, _) = common::start_mock_backend(200, common::soap_output("ok")).await;
    let shutdown = Shutdown::new();
    let base = common::start_proxy(common::proxy_config(backend), &shutdown).await;

    let res = common::client()
        .get(format!("{}/getstar?star=Vega", base))
        .header("x-request-id", "trace-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-42");

    shutdown.trigger();
}
