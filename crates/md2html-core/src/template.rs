//! Standalone HTML page assembly.

/// Stylesheet embedded in every generated page.
const STYLESHEET: &str = r"        body {
            font-family: Arial, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
        }
        .mermaid-diagram {
            max-width: 100%;
            margin: 20px 0;
        }
        .mermaid-diagram svg {
            max-width: 100%;
            height: auto;
        }
        pre {
            background-color: #f5f5f5;
            padding: 15px;
            border-radius: 5px;
            overflow-x: auto;
            margin: 1em 0;
        }
        code {
            font-family: 'Courier New', Courier, monospace;
            font-size: 0.9em;
        }
        .language-python {
            color: #333;
        }
        .highlight {
            background: #f8f8f8;
        }
";

/// Wrap an HTML fragment in a complete document with the static stylesheet.
#[must_use]
pub fn render_page(body: &str) -> String {
    let mut page = String::with_capacity(body.len() + STYLESHEET.len() + 128);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n    <style>\n");
    page.push_str(STYLESHEET);
    page.push_str("    </style>\n</head>\n<body>\n    ");
    page.push_str(body);
    page.push_str("\n</body>\n</html>\n");
    page
}
