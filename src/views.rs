// HTML views
// Renders the account list and the setup instructions page

use crate::force::Account;

const PAGE_STYLE: &str = "body{font-family:sans-serif;margin:2em auto;max-width:50em;padding:0 1em}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:.4em .6em;text-align:left}\
th{background:#f4f4f4}";

/// Render the account list page
pub fn render_index(accounts: &[Account]) -> String {
    let mut rows = String::new();
    for account in accounts {
        rows.push_str("<tr>");
        for field in [
            &account.id,
            &account.name,
            &account.account_type,
            &account.industry,
            &account.rating,
        ] {
            rows.push_str("<td>");
            rows.push_str(&escape_html(field.as_deref().unwrap_or("")));
            rows.push_str("</td>");
        }
        rows.push_str("</tr>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Salesforce Accounts</title>
<style>{style}</style>
</head>
<body>
<h1>Salesforce Accounts</h1>
<p>{count} account(s)</p>
<table>
<tr><th>Id</th><th>Name</th><th>Type</th><th>Industry</th><th>Rating</th></tr>
{rows}</table>
</body>
</html>
"#,
        style = PAGE_STYLE,
        count = accounts.len(),
        rows = rows,
    )
}

/// Render the setup instructions page shown while CONSUMER_KEY or
/// CONSUMER_SECRET is missing. `app_name` is the Heroku app name
/// guessed from the request host, possibly empty.
pub fn render_setup(app_name: &str) -> String {
    let app = if app_name.is_empty() {
        "your-app"
    } else {
        app_name
    };
    let app = escape_html(app);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Setup</title>
<style>{style}</style>
</head>
<body>
<h1>Setup your Salesforce Connected App</h1>
<ol>
<li>In Salesforce Setup, create a Connected App with OAuth enabled.</li>
<li>Set the callback URL to <code>https://{app}.herokuapp.com</code> (or wherever this app runs).</li>
<li>Copy the Consumer Key and Consumer Secret into the app configuration:
<pre>heroku config:set CONSUMER_KEY=&lt;key&gt; CONSUMER_SECRET=&lt;secret&gt; -a {app}</pre></li>
<li>Reload this page.</li>
</ol>
</body>
</html>
"#,
        style = PAGE_STYLE,
        app = app,
    )
}

/// Minimal HTML escaping for text interpolated into the pages
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
