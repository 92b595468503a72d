pub mod bot;
pub mod cli;
pub mod controller;
pub mod db;
pub mod entity;
pub mod ledger;
pub mod migration;
