pub mod api;
pub mod card;
pub mod fixture;
pub mod http_client;
pub mod lineup;
pub mod prefs;
pub mod provider;
pub mod roster;
pub mod state;
