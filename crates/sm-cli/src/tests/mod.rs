mod launch_url;
mod session;
mod token_store;
