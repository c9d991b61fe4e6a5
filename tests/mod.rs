/// Integration tests for project-migrate
///
/// Tests are organized into logical groupings:
/// - common: scripted fakes for the migration service and prompts
/// - migration: engine phases and end-to-end runs against the fakes
mod common;
mod migration;
