pub mod handshake;
pub mod launch;
pub mod orchestrator;
pub mod roulette;
pub mod scoreboard;
