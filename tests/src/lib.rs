#[cfg(test)]
mod tests {
    use apod_playback::{playback_test, Error, PlaybackConfiguration, PlaybackServer};
    use reqwest::blocking::Client;
    use serde_json::Value;

    const PICTURE_AND_IMAGE: &str = "playback_data/picture_and_image.md";
    const PICTURE_PATH: &str = "/planetary/apod?api_key=DEMO_KEY&date=2020-03-05";

    fn configure_playback(config: &mut PlaybackConfiguration) {
        config.rewrite_origin("https://apod.nasa.gov");
        config.add_playback_response_mutations(|mutations| {
            mutations.remove_headers(vec!["x-ratelimit-limit", "x-ratelimit-remaining"])
        });
    }

    fn configure_without_path_checks(config: &mut PlaybackConfiguration) {
        configure_playback(config);
        config.set_check_request_paths(false);
    }

    fn http_client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    #[playback_test("playback_data/picture_and_image.md", configure_playback)]
    fn picture_and_image_are_replayed_in_order(base_url: &str) {
        let client = http_client();

        let response = client
            .get(&format!("{}{}", base_url, PICTURE_PATH))
            .send()
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert!(response.headers().get("x-ratelimit-remaining").is_none());
        assert_eq!(response.headers()["content-type"], "application/json");

        let body: Value = response.json().unwrap();
        let image_url = body["url"].as_str().unwrap();
        assert_eq!(
            image_url,
            format!("{}/apod/image/2003/Recorded_1024.jpg", base_url)
        );

        let image = client.get(image_url).send().unwrap();
        assert_eq!(image.status().as_u16(), 200);
        assert_eq!(image.text().unwrap(), "recorded image bytes");
    }

    #[playback_test("playback_data/picture_and_image.md", configure_playback)]
    fn server_can_finish_without_requests() {}

    #[playback_test("playback_data/picture_and_image.md", configure_playback)]
    #[should_panic(expected = "Playback error")]
    fn surplus_requests_fail_the_test(base_url: &str) {
        let client = http_client();

        for path in &[PICTURE_PATH, "/apod/image/2003/Recorded_1024.jpg"] {
            let response = client.get(&format!("{}{}", base_url, path)).send().unwrap();
            assert_eq!(response.status().as_u16(), 200);
        }

        let surplus = client
            .get(&format!("{}{}", base_url, PICTURE_PATH))
            .send()
            .unwrap();
        assert_eq!(surplus.status().as_u16(), 500);
    }

    #[playback_test("playback_data/picture_and_image.md", configure_playback)]
    #[should_panic(expected = "Playback error")]
    fn unexpected_paths_fail_the_test(base_url: &str) {
        let response = http_client()
            .get(&format!("{}/planetary/other", base_url))
            .send()
            .unwrap();
        assert_eq!(response.status().as_u16(), 500);
    }

    #[playback_test("playback_data/picture_and_image.md", configure_without_path_checks)]
    fn paths_are_not_compared_when_checks_are_disabled(base_url: &str) {
        let response = http_client()
            .get(&format!("{}/planetary/other", base_url))
            .send()
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    #[test]
    fn queries_are_not_compared() {
        let mut configuration = PlaybackConfiguration::new(PICTURE_AND_IMAGE);
        configure_playback(&mut configuration);
        let server = PlaybackServer::start(configuration).unwrap();

        let response = http_client()
            .get(&format!(
                "{}/planetary/apod?api_key=ANOTHER_KEY&date=2021-01-01",
                server.base_url()
            ))
            .send()
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);

        server.finish().unwrap();
    }

    #[test]
    fn finish_reports_the_first_error() {
        let server = PlaybackServer::start(PlaybackConfiguration::new(PICTURE_AND_IMAGE)).unwrap();
        let client = http_client();

        for path in &["/first/wrong/path", "/second/wrong/path"] {
            let response = client
                .get(&format!("{}{}", server.base_url(), path))
                .send()
                .unwrap();
            assert_eq!(response.status().as_u16(), 500);
        }

        match server.finish() {
            Err(Error::UnexpectedRequest {
                interaction_number,
                expected,
                actual,
            }) => {
                assert_eq!(interaction_number, 0);
                assert_eq!(expected, "GET /planetary/apod");
                assert_eq!(actual, "GET /first/wrong/path");
            }
            other => panic!("Expected an unexpected request error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_recorded_status_is_reported() {
        let server =
            PlaybackServer::start(PlaybackConfiguration::new("playback_data/invalid_status.md"))
                .unwrap();

        let response = http_client()
            .get(&format!("{}/planetary/apod?api_key=DEMO_KEY", server.base_url()))
            .send()
            .unwrap();
        assert_eq!(response.status().as_u16(), 500);

        match server.finish() {
            Err(Error::InvalidStatusCode(code)) => assert_eq!(code, 1000),
            other => panic!("Expected an invalid status code error, got {:?}", other),
        }
    }

    #[test]
    fn missing_markdown_files_are_reported() {
        let result = PlaybackServer::start(PlaybackConfiguration::new(
            "playback_data/does_not_exist.md",
        ));

        match result {
            Err(Error::MarkdownParseError(_)) => (),
            other => panic!("Expected a markdown error, got {:?}", other),
        }
    }
}
