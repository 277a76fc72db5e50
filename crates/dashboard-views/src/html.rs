pub const SITE_NAME: &str = "FinAnalyse";

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Link to the analysis page of a symbol.
pub fn analysis_href(symbol: &str) -> String {
    format!("/analysis?ticker={}", urlencoding::encode(symbol))
}

/// Full document around `body`. `title` is escaped here.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
<script src="https://cdn.tailwindcss.com"></script>
<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
</head>
<body class="bg-gray-100 text-gray-800">
<header class="bg-white shadow-sm"><div class="max-w-6xl mx-auto px-4 py-3 flex items-center justify-between">
  <a href="/" class="text-xl font-bold text-blue-600">{site}</a>
  <form action="/analysis" method="get" class="flex gap-2">
    <input name="ticker" placeholder="Ticker (e.g. AAPL)" class="border rounded px-2 py-1 text-sm">
    <button class="bg-blue-600 text-white rounded px-3 py-1 text-sm">Analyze</button>
  </form>
</div></header>
<main class="max-w-6xl mx-auto px-4 py-6 space-y-6">
{body}
</main>
</body>
</html>"#,
        title = escape_html(title),
        site = SITE_NAME,
        body = body
    )
}
