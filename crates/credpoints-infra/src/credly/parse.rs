//! Badge page HTML -> [`BadgeSnapshot`].
//!
//! Name: first `<h1>` text, else the `og:title` meta tag. Dates: labelled text
//! ("Issued", "Date issued", "Expires", "Expired", "Expiration date"), else
//! the first and second `<time datetime>` elements. Only an explicit
//! "No Expiration" means no expiry; a page with no expiry at all is rejected.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::{Html, Selector};

use credpoints_types::badge::BadgeSnapshot;
use credpoints_types::error::FetchError;

static ISSUED_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:date\s+)?(?:issued|earned)(?:\s+on)?\s*:?\s*(.*)$").expect("issued pattern is valid")
});

static EXPIRES_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:expire[sd]|expiration(?:\s+date)?|expiry(?:\s+date)?)(?:\s+on)?\s*:?\s*(.*)$")
        .expect("expires pattern is valid")
});

static NO_EXPIRATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bno\s+expiration\b").expect("no-expiration pattern is valid"));

static DATE_IN_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z]{3,9}\.?\s+\d{1,2},\s*\d{4}|\d{4}-\d{2}-\d{2}").expect("date pattern is valid")
});

/// Visible text nodes, whitespace-collapsed, in document order.
fn text_segments(document: &Html) -> Vec<String> {
    document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node.parent()?.value().as_element()?.name();
            if matches!(parent, "script" | "style" | "noscript" | "title") {
                return None;
            }
            let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            (!collapsed.is_empty()).then_some(collapsed)
        })
        .collect()
}

/// Value of the first segment matching `label` that holds a date or says
/// "No Expiration". A bare label takes the next segment as its value.
fn labelled_value(segments: &[String], label: &Regex) -> Option<String> {
    segments.iter().enumerate().find_map(|(i, segment)| {
        let caps = label.captures(segment)?;
        let value = caps.get(1).map_or("", |m| m.as_str().trim());
        let value = if value.is_empty() {
            segments.get(i + 1)?.as_str()
        } else {
            value
        };
        (DATE_IN_TEXT.is_match(value) || NO_EXPIRATION.is_match(value)).then(|| value.to_string())
    })
}

fn select_first<'a>(document: &'a Html, selector: &str) -> Option<scraper::ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

fn cert_name(document: &Html) -> Option<String> {
    let heading = select_first(document, "h1")
        .map(|h| h.text().collect::<Vec<_>>().join(" "))
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty());
    if heading.is_some() {
        return heading;
    }

    let title = select_first(document, r#"meta[property="og:title"]"#)?
        .value()
        .attr("content")?
        .trim();
    // og:title reads "<name> was issued by <issuer> to <earner>."
    let name = title.split(" was issued by ").next().unwrap_or(title).trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn time_datetimes(document: &Html) -> Vec<String> {
    Selector::parse("time")
        .map(|selector| {
            document
                .select(&selector)
                .filter_map(|t| {
                    t.value()
                        .attr("datetime")
                        .map(str::to_string)
                        .or_else(|| Some(t.text().collect::<String>().trim().to_string()))
                })
                .filter(|v| !v.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Parse "September 26, 2027", "Sep 26, 2027", "2027-09-26" or an RFC 3339
/// timestamp, possibly embedded in surrounding text.
pub fn parse_badge_date(field: &'static str, value: &str) -> Result<NaiveDate, FetchError> {
    let invalid = || FetchError::InvalidDate {
        field,
        value: value.to_string(),
    };
    let found = DATE_IN_TEXT.find(value).ok_or_else(invalid)?.as_str();
    let normalized = found.replace('.', "");

    ["%B %d, %Y", "%b %d, %Y", "%B %d,%Y", "%b %d,%Y", "%Y-%m-%d"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&normalized, format).ok())
        .ok_or_else(invalid)
}

/// Extract certification details from a badge page.
pub fn parse_badge_html(badge_id: &str, html: &str) -> Result<BadgeSnapshot, FetchError> {
    let document = Html::parse_document(html);
    let segments = text_segments(&document);
    let times = time_datetimes(&document);

    let cert_name = cert_name(&document).ok_or(FetchError::MissingField("certification name"))?;

    let issued = labelled_value(&segments, &ISSUED_LABEL)
        .or_else(|| times.first().cloned())
        .ok_or(FetchError::MissingField("issue date"))?;
    let issued_on = parse_badge_date("issue date", &issued)?;

    let expires_on = match labelled_value(&segments, &EXPIRES_LABEL) {
        Some(value) if !NO_EXPIRATION.is_match(&value) => Some(parse_badge_date("expiry date", &value)?),
        Some(_) => None,
        None if segments.iter().any(|s| NO_EXPIRATION.is_match(s)) => None,
        None => match times.get(1) {
            Some(value) => Some(parse_badge_date("expiry date", value)?),
            None => {
                tracing::debug!(badge_id, "badge page shows neither an expiry nor \"No Expiration\"");
                return Err(FetchError::MissingField("expiry date"));
            }
        },
    };

    Ok(BadgeSnapshot {
        badge_id: badge_id.to_string(),
        cert_name,
        issued_on,
        expires_on,
    })
}
