use crate::take_token_param;

use reqwest::Url;

#[test]
fn given_url_with_token_param_then_token_is_taken_and_stripped() {
    let mut url = Url::parse("http://127.0.0.1:5000/app?token=abc123").unwrap();

    let token = take_token_param(&mut url);

    assert_eq!(token.as_deref(), Some("abc123"));
    assert_eq!(url.as_str(), "http://127.0.0.1:5000/app");
}

#[test]
fn given_url_with_other_params_then_they_are_preserved_in_order() {
    let mut url = Url::parse("http://localhost/app?tab=deck&token=abc&sort=due").unwrap();

    let token = take_token_param(&mut url);

    assert_eq!(token.as_deref(), Some("abc"));
    assert_eq!(url.query(), Some("tab=deck&sort=due"));
}

#[test]
fn given_url_without_token_param_then_url_is_untouched() {
    let mut url = Url::parse("http://localhost/app?tab=deck").unwrap();

    let token = take_token_param(&mut url);

    assert!(token.is_none());
    assert_eq!(url.query(), Some("tab=deck"));
}

#[test]
fn given_repeated_token_params_then_first_wins_and_all_are_removed() {
    let mut url = Url::parse("http://localhost/app?token=first&token=second").unwrap();

    let token = take_token_param(&mut url);

    assert_eq!(token.as_deref(), Some("first"));
    assert!(url.query().is_none());
}

#[test]
fn given_percent_encoded_token_then_value_is_decoded() {
    let mut url = Url::parse("http://localhost/app?token=a%2Bb").unwrap();

    let token = take_token_param(&mut url);

    assert_eq!(token.as_deref(), Some("a+b"));
}
