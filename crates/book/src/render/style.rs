/// Inline stylesheet embedded in every book page.
pub const BOOK_STYLESHEET: &str = r#"
    body {
      font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
      line-height: 1.6;
      max-width: 800px;
      margin: 0 auto;
      padding: 20px;
      background-color: #f5f5f5;
    }
    .container {
      background-color: white;
      padding: 30px;
      border-radius: 8px;
      box-shadow: 0 2px 10px rgba(0,0,0,0.1);
    }
    h1 {
      color: #2c3e50;
      border-bottom: 2px solid #3498db;
      padding-bottom: 10px;
    }
    .chapter {
      margin-bottom: 40px;
      padding-bottom: 20px;
      border-bottom: 1px dashed #eee;
    }
    .chapter:last-child {
      border-bottom: none;
    }
    .chapter-header {
      background-color: #f8f9fa;
      padding: 10px 15px;
      border-left: 4px solid #3498db;
      margin-bottom: 15px;
    }
    .chapter-title {
      margin: 0;
      color: #2c3e50;
    }
    .chapter-meta {
      color: #7f8c8d;
      font-size: 0.9em;
      margin: 5px 0 0 0;
    }
    .toc {
      background-color: #f8f9fa;
      padding: 20px;
      border-radius: 5px;
      margin-bottom: 30px;
    }
    .toc h2 {
      margin-top: 0;
    }
    .toc ul {
      padding-left: 20px;
    }
    .toc li {
      margin-bottom: 8px;
    }
"#;
