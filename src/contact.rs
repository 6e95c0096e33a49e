/// Outbound contact link for available units
use tracing::{info, warn};

const MESSAGING_BASE: &str = "https://wa.me";

/// Build the messaging link for a unit, with the templated text encoded
pub fn contact_url(phone: &str, template: &str, unit_id: &str) -> String {
    let text = template.replace("{id}", unit_id);
    format!("{}/{}?text={}", MESSAGING_BASE, phone, encode_component(&text))
}

/// Open the link in the system browser. Failure is logged, not fatal.
pub fn open_contact(url: &str) {
    match webbrowser::open(url) {
        Ok(()) => info!("💬 Opened contact link {}", url),
        Err(e) => warn!("⚠️  Could not open browser for {}: {}", url, e),
    }
}

/// Percent-encode everything outside the URI-component unreserved set
fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
