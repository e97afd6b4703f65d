//! # Ranking Stage
//!
//! Asks the text-generation service to pick 1 to 3 sneakers from the
//! aggregated candidates and explain each pick, then checks every pick
//! against the candidates before accepting it.
//!
//! ## Response handling
//! 1. Parse the trimmed reply; if that fails, strip code fences first
//! 2. Parse JSON: a top-level array, or an object with a
//!    `recommendations` array
//! 3. Drop items missing `name`, `brand`, `price`, `url` or `reason`
//! 4. Drop items that are not an exact `(name, brand)` candidate
//! 5. Take price and url from the catalog; backfill `image_url`
//! 6. Drop repeats and keep at most three

use std::sync::Arc;

use catalog::{Brand, Preferences, Product};
use llm_client::TextGenerator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::error::AdvisorError;

/// Upper bound on picks per request.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Final recommendation returned to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub brand: Brand,
    pub price: f64,
    pub url: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One line of the candidate listing embedded in the prompt.
#[derive(Serialize)]
struct ListingEntry<'a> {
    brand: Brand,
    name: &'a str,
    price: f64,
    description: &'a str,
    url: &'a str,
    image_url: &'a str,
}

/// LLM-backed selection of the final recommendations.
#[derive(Clone)]
pub struct RankingStage {
    generator: Arc<dyn TextGenerator>,
}

impl RankingStage {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Pick recommendations from `candidates`.
    ///
    /// An empty candidate list fails with `NoCatalogMatches` before the
    /// service is contacted. A parsed reply with no usable items is
    /// `Ok(vec![])`, not an error.
    #[instrument(skip_all, fields(candidates = candidates.len(), model = self.generator.name()))]
    pub async fn rank(
        &self,
        candidates: &[Product],
        preferences: &Preferences,
    ) -> Result<Vec<Recommendation>, AdvisorError> {
        if candidates.is_empty() {
            warn!("Ranking stage called without candidates, not contacting the service");
            return Err(AdvisorError::NoCatalogMatches);
        }

        let prompt = build_prompt(candidates, preferences).map_err(|e| {
            AdvisorError::RankingService(format!("could not serialize candidate listing: {}", e))
        })?;
        debug!("Ranking prompt:\n{}", prompt);

        let raw = self.generator.generate(&prompt).await?;
        debug!("Ranking service raw response:\n{}", raw);

        let recommendations = parse_response(&raw, candidates)?;
        info!("Ranking stage produced {} recommendations", recommendations.len());
        Ok(recommendations)
    }
}

/// Build the instruction prompt for the generation service.
pub fn build_prompt(candidates: &[Product], preferences: &Preferences) -> serde_json::Result<String> {
    let listing: Vec<ListingEntry<'_>> = candidates
        .iter()
        .map(|p| ListingEntry {
            brand: p.brand,
            name: &p.name,
            price: p.price,
            description: &p.description,
            url: &p.url,
            image_url: p.image_url.as_deref().unwrap_or(""),
        })
        .collect();
    let listing = serde_json::to_string_pretty(&listing)?;

    let or_unspecified = |value: &Option<String>| value.clone().unwrap_or_else(|| "Not specified".to_string());
    let brands = if preferences.preferred_brands.is_empty() {
        "Any".to_string()
    } else {
        preferences.preferred_brands.join(", ")
    };

    let lines = [
        "You are an expert sneaker advisor.".to_string(),
        "Analyze the available sneakers together with the user's preferences and recommend the 1 to 3 best-fitting sneakers.".to_string(),
        "Recommend ONLY sneakers from the list of available sneakers, and copy their name, brand, price, url and image_url exactly as listed.".to_string(),
        "Budget and gender/age group have already been applied to the list, so focus on style, color, use case and overall suitability based on the descriptions.".to_string(),
        "When several sneakers fit, prefer the ones matching more of the user's specific preferences.".to_string(),
        "Respond with a JSON array of objects with the fields \"name\", \"brand\", \"price\", \"url\", \"image_url\" and \"reason\", where \"reason\" is one concise sentence.".to_string(),
        "If no sneaker suits the user's style, color or use case, respond with an empty JSON array [].".to_string(),
        String::new(),
        "User preferences:".to_string(),
        format!("- Gender/Age group: {}", preferences.demographic),
        format!("- Budget range: {}", preferences.budget),
        format!("- Preferred brands: {}", brands),
        format!("- Desired style: {}", or_unspecified(&preferences.style)),
        format!("- Desired color: {}", or_unspecified(&preferences.color)),
        format!("- Intended use case: {}", or_unspecified(&preferences.use_case)),
        String::new(),
        "Available sneakers:".to_string(),
        listing,
        String::new(),
        "Respond with your top 1 to 3 recommendations in the JSON format described above.".to_string(),
    ];
    Ok(lines.join("\n"))
}

/// Remove markdown code fences around a reply, along with any text
/// before the opening fence or after the closing one.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(open) = trimmed.find("```") else {
        return trimmed;
    };

    // Skip the fence and its language tag up to the end of that line
    let after_open = &trimmed[open + 3..];
    let body = match after_open.find('\n') {
        Some(newline) => &after_open[newline + 1..],
        None => after_open.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    match body.rfind("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// Parse and validate a raw service reply against the candidates.
pub fn parse_response(raw: &str, candidates: &[Product]) -> Result<Vec<Recommendation>, AdvisorError> {
    let parse_error = |reason: String| AdvisorError::RankingParse {
        reason,
        raw: raw.to_string(),
    };

    // Bare JSON may itself contain backticks, so only unwrap fences
    // when the reply does not parse as-is.
    let trimmed = raw.trim();
    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => serde_json::from_str(strip_code_fences(trimmed)).map_err(|e| parse_error(e.to_string()))?,
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("recommendations") {
            Some(Value::Array(items)) => items,
            _ => return Err(parse_error("expected a JSON array of recommendations".to_string())),
        },
        _ => return Err(parse_error("expected a JSON array of recommendations".to_string())),
    };

    let mut recommendations: Vec<Recommendation> = Vec::new();
    for item in &items {
        let recommendation = match validate_item(item, candidates) {
            Ok(recommendation) => recommendation,
            Err(reason) => {
                warn!("Dropping recommendation ({}): {}", reason, item);
                continue;
            }
        };

        if recommendations
            .iter()
            .any(|r| r.brand == recommendation.brand && r.name == recommendation.name)
        {
            warn!("Dropping repeated recommendation: {}", recommendation.name);
            continue;
        }
        if recommendations.len() == MAX_RECOMMENDATIONS {
            warn!(
                "Service returned more than {} valid recommendations, ignoring the rest",
                MAX_RECOMMENDATIONS
            );
            break;
        }
        recommendations.push(recommendation);
    }

    if recommendations.is_empty() {
        info!("No valid recommendations in a reply of {} items", items.len());
    }
    Ok(recommendations)
}

fn validate_item(item: &Value, candidates: &[Product]) -> Result<Recommendation, String> {
    let object = item.as_object().ok_or("not a JSON object")?;

    let name = required_str(object, "name")?;
    let brand = required_str(object, "brand")?;
    let url = required_str(object, "url")?;
    let reason = required_str(object, "reason")?;
    let price = object
        .get("price")
        .and_then(price_value)
        .ok_or("missing or invalid 'price'")?;

    let product = candidates
        .iter()
        .find(|p| p.name == name && p.brand.as_str() == brand)
        .ok_or_else(|| format!("'{} / {}' is not one of the candidates", brand, name))?;

    if (product.price - price).abs() > 0.005 {
        debug!(
            "Service quoted {:.2} for {}, using catalog price {:.2}",
            price, product.name, product.price
        );
    }
    if product.url != url {
        debug!("Service quoted url {} for {}, using catalog url", url, product.name);
    }

    let image_url = object
        .get("image_url")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .or_else(|| product.image_url.clone());

    Ok(Recommendation {
        name: product.name.clone(),
        brand: product.brand,
        price: product.price,
        url: product.url.clone(),
        reason: reason.trim().to_string(),
        image_url,
    })
}

fn required_str<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a str, String> {
    object
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| format!("missing or empty '{}'", field))
}

/// Numbers, or strings holding a number (e.g. "110.00").
fn price_value(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_start_matches('$').parse().ok()?,
        _ => return None,
    };
    (price.is_finite() && price >= 0.0).then_some(price)
}
