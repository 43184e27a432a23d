mod google_tts_client;

pub use google_tts_client::GoogleTtsClient;
