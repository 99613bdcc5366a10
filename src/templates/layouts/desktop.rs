use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; }
header { display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
header nav ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
main { padding: 1rem 1.5rem; }
.directory { display: grid; grid-template-columns: minmax(0, 1fr) auto; gap: 1.5rem; }
.listing-card { border: 1px solid #e5e7eb; border-radius: 8px; padding: 0.75rem 1rem; margin-bottom: 0.75rem; }
.listing-card.is-selected { border-color: #524ed2; box-shadow: 0 0 0 2px #524ed2; }
.badge { display: inline-block; font-size: 0.75rem; padding: 0.1rem 0.5rem; border-radius: 999px; background: #eef2ff; margin-right: 0.25rem; }
.filter-bar a.is-active { font-weight: bold; text-decoration: underline; }
.map-panel { position: relative; overflow: hidden; background: #dbeafe; border-radius: 8px; }
.map-marker { position: absolute; transform: translate(-50%, -100%); width: 14px; height: 14px; border-radius: 50%; background: #dc2626; border: 2px solid white; }
.map-marker.is-emphasized { width: 22px; height: 22px; background: #524ed2; z-index: 2; }
.map-popup { position: absolute; transform: translate(-50%, calc(-100% - 26px)); background: white; padding: 0.5rem 0.75rem; border-radius: 6px; box-shadow: 0 2px 6px rgba(0,0,0,.2); z-index: 3; }
.map-fallback, .inline-error { padding: 0.75rem 1rem; border-radius: 6px; background: #fef3c7; }
.inline-error { background: #fee2e2; }
.field-error { color: #dc2626; font-size: 0.85rem; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { a href="/businesses" { "Tourism Directory" } }
                    nav {
                        ul {
                            li { a href="/businesses" { "Explore" } }
                            li { a href="/itineraries" { "My trips" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
