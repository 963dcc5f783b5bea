// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use auth_bridge::{
	_preludet::*,
	error::TransportError,
	http::{CredentialExchange, ExchangeRequest, ReqwestExchangeClient},
	reqwest,
	web::ControllerConfig,
};

fn client(server: &MockServer) -> Result<ReqwestExchangeClient> {
	let origin = Url::parse(&server.url("/users/sign_in"))?;
	let endpoint = ControllerConfig::default().exchange_endpoint(&origin)?;

	Ok(ReqwestExchangeClient::new(endpoint)?)
}

#[tokio::test]
async fn redirect_response_counts_as_success() -> Result<()> {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/google/callback");
			then.status(302).header("location", "/dashboard");
		})
		.await;
	let response = client(&server)?.exchange(ExchangeRequest::new("XYZ")).await?;

	mock.assert_async().await;

	assert_eq!(response.status, 302);
	assert!(response.redirected);

	Ok(())
}

#[tokio::test]
async fn plain_ok_response_is_not_a_redirect() -> Result<()> {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/google/callback");
			then.status(200).body("<html>sign in again</html>");
		})
		.await;
	let response = client(&server)?.exchange(ExchangeRequest::new("XYZ")).await?;

	mock.assert_async().await;

	assert_eq!(response.status, 200);
	assert!(!response.redirected);

	Ok(())
}

#[tokio::test]
async fn followed_redirects_are_detected_by_final_url() -> Result<()> {
	let server = MockServer::start_async().await;
	let callback = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/google/callback");
			then.status(303).header("location", "/dashboard");
		})
		.await;
	let dashboard = server
		.mock_async(|when, then| {
			when.method(GET).path("/dashboard");
			then.status(200);
		})
		.await;
	let endpoint = Url::parse(&server.url("/auth/google/callback"))?;
	let client = ReqwestExchangeClient::with_client(reqwest::Client::new(), endpoint);
	let response = client.exchange(ExchangeRequest::new("XYZ")).await?;

	callback.assert_async().await;
	dashboard.assert_async().await;

	assert_eq!(response.status, 200);
	assert!(response.redirected);

	Ok(())
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() -> Result<()> {
	let endpoint = Url::parse("http://127.0.0.1:9/auth/google/callback")?;
	let err = ReqwestExchangeClient::new(endpoint)?
		.exchange(ExchangeRequest::new("XYZ"))
		.await
		.expect_err("Nothing listens on the discard port.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));

	Ok(())
}
