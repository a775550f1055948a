use crate::types::issue::Tier;
use crate::types::report::ReportModel;

const STYLE: &str = ":root{--bg:#f7fafc;--fg:#111827;--muted:#6b7280;--card:#ffffff;--border:#e5e7eb;--accent:#2563eb;--ok:#16a34a;--warn:#d97706;--err:#dc2626;--crit:#7f1d1d} body{margin:0;background:var(--bg);color:var(--fg);font-family:system-ui,-apple-system,Segoe UI,Arial,sans-serif} .container{max-width:1100px;margin:0 auto;padding:24px} .title{font-size:20px;font-weight:600} .sub{color:var(--muted);font-size:13px;margin-bottom:16px} .grid{display:grid;grid-template-columns:repeat(4,minmax(0,1fr));gap:12px} .card{background:var(--card);border:1px solid var(--border);border-radius:10px;padding:14px} .label{color:var(--muted);font-size:12px} .value{font-size:22px;font-weight:700} .value.ok{color:var(--ok)} .value.warn{color:var(--warn)} .value.err{color:var(--err)} .section{margin-top:18px} .section h3{margin:0 0 10px 0;font-size:16px} .table{width:100%;border-collapse:collapse;background:var(--card);border:1px solid var(--border)} .table th,.table td{padding:8px 10px;border-bottom:1px solid var(--border);text-align:left;vertical-align:top} .chip{display:inline-block;border-radius:999px;padding:2px 10px;font-size:12px;border:1px solid var(--border)} .tier-critical{background:#fee2e2;color:var(--crit)} .tier-error{background:#ffedd5;color:#9a3412} .tier-warning{background:#fef3c7;color:#854d0e} .filters button{margin-right:6px;padding:4px 12px;border-radius:999px;border:1px solid var(--border);background:var(--card);cursor:pointer} .filters button.active{background:var(--accent);color:#fff} .footer{margin-top:22px;color:var(--muted);font-size:12px} @media (max-width:700px){.grid{grid-template-columns:repeat(2,minmax(0,1fr))}}";

const SCRIPT: &str = "function filterTier(tier,btn){document.querySelectorAll('#issues tbody tr').forEach(function(tr){tr.style.display=(tier==='all'||tr.dataset.tier===tier)?'':'none';});document.querySelectorAll('.filters button').forEach(function(b){b.classList.remove('active');});if(btn){btn.classList.add('active');}}";

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn score_class(score: u8) -> &'static str {
    match score {
        80..=100 => "value ok",
        50..=79 => "value warn",
        _ => "value err",
    }
}

fn metric(s: &mut String, label: &str, class: &str, value: impl std::fmt::Display) {
    s.push_str(&format!(
        "<div class=\"card\"><div class=\"label\">{}</div><div class=\"{}\">{}</div></div>",
        html_escape(label),
        class,
        value
    ));
}

pub fn to_html(report: &ReportModel) -> String {
    let analysis = &report.analysis;
    let health = &analysis.health;
    let mut s = String::new();

    s.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"><title>Chat Server Health Report</title><style>");
    s.push_str(STYLE);
    s.push_str("</style><script>");
    s.push_str(SCRIPT);
    s.push_str("</script></head><body><div class=\"container\">");
    s.push_str("<div class=\"title\">Chat Server Health Report</div>");
    s.push_str(&format!(
        "<div class=\"sub\">{} · generated {}</div>",
        html_escape(&report.metadata.source_path),
        report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    s.push_str("<div class=\"grid\">");
    metric(&mut s, "Health Score", score_class(health.overall), health.overall);
    metric(&mut s, "Critical", "value err", health.tier_counts.critical);
    metric(&mut s, "Errors", "value warn", health.tier_counts.error);
    metric(&mut s, "Warnings", "value", health.tier_counts.warning);
    s.push_str("</div>");

    s.push_str("<div class=\"section\"><h3>Sources</h3><table class=\"table\"><thead><tr><th>Source</th><th>Status</th></tr></thead><tbody>");
    for (name, status) in analysis.sources.entries() {
        s.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>",
            name,
            status.as_str()
        ));
    }
    s.push_str("</tbody></table></div>");

    if let Some(settings) = &analysis.settings {
        s.push_str("<div class=\"section\"><h3>Settings Overview</h3><div class=\"grid\">");
        metric(&mut s, "Security-related settings", "value", settings.security_related);
        metric(&mut s, "Security issues", "value err", settings.security_issues);
        metric(&mut s, "Performance-related settings", "value", settings.performance_related);
        metric(&mut s, "Performance issues", "value warn", settings.performance_issues);
        s.push_str("</div></div>");
    }

    if let Some(stats) = &analysis.statistics {
        s.push_str("<div class=\"section\"><h3>Server Statistics</h3><div class=\"grid\">");
        metric(&mut s, "Version", "value", html_escape(&stats.version));
        metric(&mut s, "Users online", "value", stats.users.online);
        metric(&mut s, "Memory used (MiB)", "value", stats.memory_used_mib);
        metric(&mut s, "Database (MiB)", "value", stats.database_mib);
        s.push_str("</div></div>");
    }

    s.push_str("<div class=\"section\"><h3>Issues</h3><div class=\"filters\">");
    s.push_str("<button class=\"active\" onclick=\"filterTier('all',this)\">All</button>");
    for tier in [Tier::Critical, Tier::Error, Tier::Warning] {
        s.push_str(&format!(
            "<button onclick=\"filterTier('{0}',this)\">{0}</button>",
            tier
        ));
    }
    s.push_str("</div><table class=\"table\" id=\"issues\"><thead><tr><th>Tier</th><th>Category</th><th>Source</th><th>Message</th><th>Setting</th></tr></thead><tbody>");
    for tier in [Tier::Critical, Tier::Error, Tier::Warning] {
        for issue in report.issues_in(tier) {
            s.push_str(&format!(
                "<tr data-tier=\"{0}\"><td><span class=\"chip tier-{0}\">{0}</span></td><td>{1}</td><td>{2}</td><td>{3}</td><td>{4}</td></tr>",
                tier,
                issue.category,
                issue.origin,
                html_escape(&issue.message),
                html_escape(issue.source_key.as_deref().unwrap_or(""))
            ));
        }
    }
    s.push_str("</tbody></table></div>");

    s.push_str("<div class=\"section\"><h3>Recommendations</h3><div class=\"card\"><ol>");
    for recommendation in &health.recommendations {
        s.push_str(&format!("<li>{}</li>", html_escape(recommendation)));
    }
    s.push_str("</ol></div></div>");

    s.push_str(&format!(
        "<div class=\"footer\">dumpscope {} · fingerprint {}</div>",
        html_escape(&report.metadata.tool_version),
        report.fingerprint
    ));
    s.push_str("</div></body></html>");
    s
}
