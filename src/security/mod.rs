pub mod command_guard;
