//! Common Rill snippets used across tests.

pub const ASSIGNMENTS: &str = "a = 1\nb = 2\nc = 3\n";

pub const METHOD_WITH_COMMENTS: &str = r#"# Greets someone
def greet(name)
  # build the message
  message = "hello " + name
  puts message # print it
end
"#;

pub const HEREDOC_CALL: &str = "x = <<~EOS.strip\n  body\nEOS\ny = 2\n";

pub const BLOCK_COMMENT: &str = "=begin\nnotes\nmore notes\n=end\nx = 1\n";

pub const END_MARKER: &str = "a = 1\n__END__\njunk";

pub const MISSING_END: &str = "def broken\n  x = 1\n";

pub const UNBALANCED_PAREN: &str = "x = (\ny = 2\n";
