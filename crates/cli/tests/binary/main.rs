mod harness;
mod offline;
mod online;
