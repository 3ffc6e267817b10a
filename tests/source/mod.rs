mod tests_comments;
mod tests_encoding;
mod tests_engines;
mod tests_files;
mod tests_fixtures;
mod tests_lines;
mod tests_scenarios;
mod tests_tokens;
