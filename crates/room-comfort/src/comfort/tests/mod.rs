mod common;
mod independence;
