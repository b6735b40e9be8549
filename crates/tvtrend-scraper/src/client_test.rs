use super::*;

fn client(base_url: &str) -> EpisodesClient {
    EpisodesClient::new(base_url, 5, "tvtrend-test/0.1", 0, 0)
        .expect("failed to build test EpisodesClient")
}

#[test]
fn episodes_url_interpolates_show_and_season() {
    let c = client("https://www.imdb.com");
    let url = c.episodes_url(&ShowId::from("tt0944947"), 3);
    assert_eq!(url, "https://www.imdb.com/title/tt0944947/episodes?season=3");
}

#[test]
fn episodes_url_tolerates_trailing_slash_in_base() {
    let c = client("https://www.imdb.com/");
    let url = c.episodes_url(&ShowId::from("tt0001"), 1);
    assert_eq!(url, "https://www.imdb.com/title/tt0001/episodes?season=1");
}

#[test]
fn local_base_url_is_accepted() {
    let c = client("http://127.0.0.1:9000");
    let url = c.episodes_url(&ShowId::from("tt0001"), 2);
    assert_eq!(url, "http://127.0.0.1:9000/title/tt0001/episodes?season=2");
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = EpisodesClient::new("not-a-url", 5, "tvtrend-test/0.1", 0, 0);
    assert!(
        matches!(result, Err(ScraperError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl, got an Ok or a different error"
    );
}
