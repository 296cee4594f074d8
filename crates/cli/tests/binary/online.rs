use crate::harness::TestServer;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn serves_certificates_end_to_end() {
    let server = TestServer::start("certd-e2e").await;

    let first = reqwest::get(server.url("/cert/example.com")).await.unwrap().text().await.unwrap();
    let second = reqwest::get(server.url("/cert/example.com")).await.unwrap().text().await.unwrap();

    assert!(first.ends_with("-example.com"), "unexpected body: {first}");
    assert_eq!(first, second);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn status_shows_bootstrapped_self() {
    let server = TestServer::start("certd-e2e").await;

    let json: serde_json::Value =
        reqwest::get(server.url("/v1/status")).await.unwrap().json().await.unwrap();
    assert_eq!(json["self_name"], "certd-e2e");
    assert_eq!(json["records"], 1);
    assert_eq!(json["fetching"], 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn root_shows_instructions() {
    let server = TestServer::start("certd-e2e").await;

    let body = reqwest::get(server.url("/")).await.unwrap().text().await.unwrap();
    assert!(body.contains("/cert/{domain}"), "unexpected body: {body}");
}
