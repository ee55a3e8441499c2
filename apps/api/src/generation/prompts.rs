//! Prompt construction for marketing-copy generation.
//!
//! Pure functions: identical inputs yield byte-identical instruction text.
//! One exhaustive match arm per (source kind, content type) pair carries the
//! persona framing, the tone directive, and the hard format constraint; the
//! record summary below it serializes only the fields that are present.

use crate::generation::snapshots::{PropertySnapshot, SourceSnapshot, VehicleSnapshot};
use crate::models::content::ContentType;

/// Builds the full instruction text for one generation request.
pub fn build_prompt(snapshot: &SourceSnapshot, content_type: ContentType, tone: &str) -> String {
    match snapshot {
        SourceSnapshot::Property(property) => property_prompt(content_type, tone, property),
        SourceSnapshot::Vehicle(vehicle) => vehicle_prompt(content_type, tone, vehicle),
    }
}

fn property_prompt(content_type: ContentType, tone: &str, property: &PropertySnapshot) -> String {
    let tone_line = format!("Write in a {tone} tone.");
    let summary = property_summary(property);

    match content_type {
        ContentType::ListingDescription => format!(
            "You are a real estate copywriter. {tone_line} Write a compelling MLS listing \
             description for this property. 3–4 sentences, no bullet points, highlight the best \
             features.\n\n{summary}"
        ),
        ContentType::SocialInstagram => format!(
            "You are a real estate social media expert. {tone_line} Write a punchy Instagram \
             caption for this listing. Include 5–8 relevant hashtags at the end. Keep it under \
             150 words.\n\n{summary}"
        ),
        ContentType::SocialFacebook => format!(
            "You are a real estate marketing expert. {tone_line} Write an engaging Facebook post \
             for this listing. 2–3 paragraphs, conversational, end with a \
             call-to-action.\n\n{summary}"
        ),
        ContentType::SocialTwitter => format!(
            "You are a real estate social media expert. {tone_line} Write a Twitter/X post for \
             this listing. Must be under 280 characters. Include price and key \
             stat.\n\n{summary}"
        ),
        ContentType::EmailCampaign => format!(
            "You are a real estate email marketer. {tone_line} Write a property spotlight email. \
             Include: subject line, short intro, property highlights in bullets, and a CTA. Keep \
             it under 200 words.\n\n{summary}"
        ),
        ContentType::SmsBlast => format!(
            "You are a real estate marketer. Write a short SMS message about this property. Max \
             160 characters. Include price and address.\n\n{summary}"
        ),
        ContentType::VideoScript => format!(
            "You are a real estate video script writer. {tone_line} Write a 60-second video \
             walkthrough script for this property. Include an intro hook, room-by-room \
             highlights, and a closing CTA.\n\n{summary}"
        ),
        ContentType::AdCopy => format!(
            "You are a real estate ad copywriter. {tone_line} Write Google/Facebook ad copy for \
             this property. Headline (max 30 chars), Description line 1 (max 90 chars), \
             Description line 2 (max 90 chars).\n\n{summary}"
        ),
    }
}

fn vehicle_prompt(content_type: ContentType, tone: &str, vehicle: &VehicleSnapshot) -> String {
    let tone_line = format!("Write in a {tone} tone.");
    let summary = vehicle_summary(vehicle);

    match content_type {
        ContentType::ListingDescription => format!(
            "You are an automotive copywriter. {tone_line} Write a compelling vehicle listing \
             description. 3–4 sentences, highlight key specs and appeal.\n\n{summary}"
        ),
        ContentType::SocialInstagram => format!(
            "You are an automotive social media expert. {tone_line} Write a punchy Instagram \
             caption for this vehicle. Include 5–8 relevant hashtags. Under 150 \
             words.\n\n{summary}"
        ),
        ContentType::SocialFacebook => format!(
            "You are an automotive marketing expert. {tone_line} Write an engaging Facebook post \
             for this vehicle. 2–3 paragraphs, conversational, end with a CTA.\n\n{summary}"
        ),
        ContentType::SocialTwitter => format!(
            "You are an automotive social media expert. {tone_line} Write a Twitter/X post for \
             this vehicle. Max 280 characters. Include price and key stat.\n\n{summary}"
        ),
        ContentType::EmailCampaign => format!(
            "You are an automotive email marketer. {tone_line} Write a vehicle spotlight email. \
             Include: subject line, highlights in bullets, and a CTA. Under 200 \
             words.\n\n{summary}"
        ),
        ContentType::SmsBlast => format!(
            "You are an automotive marketer. Write a short SMS about this vehicle. Max 160 \
             characters. Include price and model.\n\n{summary}"
        ),
        ContentType::VideoScript => format!(
            "You are an automotive video script writer. {tone_line} Write a 60-second walkaround \
             video script. Include intro hook, feature highlights, and closing \
             CTA.\n\n{summary}"
        ),
        ContentType::AdCopy => format!(
            "You are an automotive ad copywriter. {tone_line} Write Google/Facebook ad copy. \
             Headline (max 30 chars), Description line 1 (max 90 chars), Description line 2 (max \
             90 chars).\n\n{summary}"
        ),
    }
}

/// Serializes the salient property fields, one per line. Absent optional
/// fields are omitted entirely: no labels for missing data.
fn property_summary(property: &PropertySnapshot) -> String {
    let mut lines = vec![
        format!(
            "Address: {}, {}, {} {}",
            property.address, property.city, property.state, property.zip_code
        ),
        format!("Price: ${}", format_thousands(property.price)),
        format!("Type: {}", property.property_type),
        format!(
            "Beds: {} | Baths: {} | Sq Ft: {}",
            property.bedrooms,
            property.bathrooms,
            format_thousands(property.square_feet)
        ),
    ];

    if let Some(year_built) = property.year_built {
        lines.push(format!("Year Built: {year_built}"));
    }
    if !property.features.is_empty() {
        lines.push(format!("Features: {}", property.features.join(", ")));
    }
    if let Some(notes) = non_empty(property.description.as_deref()) {
        lines.push(format!("Notes: {notes}"));
    }

    lines.join("\n")
}

fn vehicle_summary(vehicle: &VehicleSnapshot) -> String {
    let mut title = format!("{} {} {}", vehicle.year, vehicle.make, vehicle.model);
    if let Some(trim) = non_empty(vehicle.trim.as_deref()) {
        title.push(' ');
        title.push_str(trim);
    }

    let mut lines = vec![
        title,
        format!("Price: ${}", format_thousands(vehicle.price)),
        format!("Condition: {}", vehicle.condition.as_str()),
        format!("Mileage: {} miles", format_thousands(vehicle.mileage)),
    ];

    if let Some(color) = non_empty(vehicle.color.as_deref()) {
        lines.push(format!("Exterior: {color}"));
    }
    if let Some(transmission) = non_empty(vehicle.transmission.as_deref()) {
        lines.push(format!("Transmission: {transmission}"));
    }
    if let Some(engine) = non_empty(vehicle.engine.as_deref()) {
        lines.push(format!("Engine: {engine}"));
    }
    if let Some(fuel_type) = non_empty(vehicle.fuel_type.as_deref()) {
        lines.push(format!("Fuel: {fuel_type}"));
    }
    if !vehicle.features.is_empty() {
        lines.push(format!("Features: {}", vehicle.features.join(", ")));
    }
    if let Some(notes) = non_empty(vehicle.description.as_deref()) {
        lines.push(format!("Notes: {notes}"));
    }

    lines.join("\n")
}

/// Empty strings count as absent.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Renders a numeric amount with comma grouping, e.g. `950000 -> "950,000"`.
/// Fractional parts round to two places and drop trailing zeros.
pub fn format_thousands(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();

    let mut whole = abs.trunc() as u64;
    let mut cents = ((abs - abs.trunc()) * 100.0).round() as u64;
    if cents >= 100 {
        whole += 1;
        cents = 0;
    }

    let mut grouped = group_digits(whole);
    if cents > 0 {
        let fraction = format!("{cents:02}");
        grouped.push('.');
        grouped.push_str(fraction.trim_end_matches('0'));
    }
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listing::VehicleCondition;

    fn miami_condo() -> PropertySnapshot {
        PropertySnapshot {
            address: "1 Ocean Dr".to_string(),
            city: "Miami".to_string(),
            state: "FL".to_string(),
            zip_code: "33139".to_string(),
            price: 950000.0,
            bedrooms: 2.0,
            bathrooms: 2.0,
            square_feet: 1400.0,
            property_type: "condo".to_string(),
            year_built: None,
            features: vec!["Ocean View".to_string()],
            description: None,
        }
    }

    fn tacoma() -> VehicleSnapshot {
        VehicleSnapshot {
            year: 2022,
            make: "Toyota".to_string(),
            model: "Tacoma".to_string(),
            trim: Some("TRD Off-Road".to_string()),
            price: 41500.0,
            condition: VehicleCondition::Certified,
            mileage: 18250.0,
            color: Some("Army Green".to_string()),
            transmission: None,
            engine: None,
            fuel_type: None,
            features: vec!["Crawl Control".to_string(), "Tow Package".to_string()],
            description: None,
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let snapshot = SourceSnapshot::Property(miami_condo());
        for content_type in ContentType::ALL {
            let first = build_prompt(&snapshot, content_type, "luxury");
            let second = build_prompt(&snapshot, content_type, "luxury");
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_property_prompts_carry_their_format_constraints() {
        let snapshot = SourceSnapshot::Property(miami_condo());
        let expectations = [
            (ContentType::ListingDescription, "3–4 sentences"),
            (ContentType::SocialInstagram, "under 150 words"),
            (ContentType::SocialFacebook, "2–3 paragraphs"),
            (ContentType::SocialTwitter, "280 characters"),
            (ContentType::EmailCampaign, "under 200 words"),
            (ContentType::SmsBlast, "160 characters"),
            (ContentType::VideoScript, "60-second"),
            (ContentType::AdCopy, "max 30 chars"),
        ];
        for (content_type, phrase) in expectations {
            let prompt = build_prompt(&snapshot, content_type, "professional");
            assert!(
                prompt.contains(phrase),
                "{} prompt missing constraint phrase '{phrase}'",
                content_type.as_str()
            );
        }
    }

    #[test]
    fn test_vehicle_prompts_carry_their_format_constraints() {
        let snapshot = SourceSnapshot::Vehicle(tacoma());
        let expectations = [
            (ContentType::ListingDescription, "3–4 sentences"),
            (ContentType::SocialInstagram, "5–8 relevant hashtags"),
            (ContentType::SocialFacebook, "2–3 paragraphs"),
            (ContentType::SocialTwitter, "280 characters"),
            (ContentType::EmailCampaign, "200 words"),
            (ContentType::SmsBlast, "160 characters"),
            (ContentType::VideoScript, "60-second"),
            (ContentType::AdCopy, "max 90 chars"),
        ];
        for (content_type, phrase) in expectations {
            let prompt = build_prompt(&snapshot, content_type, "professional");
            assert!(
                prompt.contains(phrase),
                "{} prompt missing constraint phrase '{phrase}'",
                content_type.as_str()
            );
        }
    }

    #[test]
    fn test_tone_directive_present_except_for_sms() {
        let snapshot = SourceSnapshot::Property(miami_condo());
        for content_type in ContentType::ALL {
            let prompt = build_prompt(&snapshot, content_type, "luxury");
            if content_type == ContentType::SmsBlast {
                assert!(!prompt.contains("tone"), "SMS prompt must not carry a tone");
            } else {
                assert!(
                    prompt.contains("Write in a luxury tone."),
                    "{} prompt missing tone directive",
                    content_type.as_str()
                );
            }
        }
    }

    #[test]
    fn test_absent_optional_fields_leave_no_labels() {
        let snapshot = SourceSnapshot::Property(miami_condo());
        let prompt = build_prompt(&snapshot, ContentType::ListingDescription, "professional");
        assert!(!prompt.contains("Year Built:"));
        assert!(!prompt.contains("Notes:"));
    }

    #[test]
    fn test_present_optional_fields_are_rendered() {
        let mut condo = miami_condo();
        condo.year_built = Some(2008);
        condo.description = Some("Corner unit with wraparound balcony".to_string());
        let prompt = build_prompt(
            &SourceSnapshot::Property(condo),
            ContentType::ListingDescription,
            "professional",
        );
        assert!(prompt.contains("Year Built: 2008"));
        assert!(prompt.contains("Notes: Corner unit with wraparound balcony"));
    }

    #[test]
    fn test_empty_description_is_treated_as_absent() {
        let mut condo = miami_condo();
        condo.description = Some(String::new());
        let prompt = build_prompt(
            &SourceSnapshot::Property(condo),
            ContentType::ListingDescription,
            "professional",
        );
        assert!(!prompt.contains("Notes:"));
    }

    #[test]
    fn test_property_summary_fields() {
        let prompt = build_prompt(
            &SourceSnapshot::Property(miami_condo()),
            ContentType::SocialTwitter,
            "luxury",
        );
        assert!(prompt.contains("Address: 1 Ocean Dr, Miami, FL 33139"));
        assert!(prompt.contains("Price: $950,000"));
        assert!(prompt.contains("Type: condo"));
        assert!(prompt.contains("Beds: 2 | Baths: 2 | Sq Ft: 1,400"));
        assert!(prompt.contains("Features: Ocean View"));
    }

    #[test]
    fn test_vehicle_summary_fields() {
        let prompt = build_prompt(
            &SourceSnapshot::Vehicle(tacoma()),
            ContentType::ListingDescription,
            "energetic",
        );
        assert!(prompt.contains("2022 Toyota Tacoma TRD Off-Road"));
        assert!(prompt.contains("Price: $41,500"));
        assert!(prompt.contains("Condition: certified"));
        assert!(prompt.contains("Mileage: 18,250 miles"));
        assert!(prompt.contains("Exterior: Army Green"));
        assert!(!prompt.contains("Transmission:"));
        assert!(!prompt.contains("Fuel:"));
        assert!(prompt.contains("Features: Crawl Control, Tow Package"));
    }

    #[test]
    fn test_vehicle_without_trim_has_plain_title() {
        let mut truck = tacoma();
        truck.trim = None;
        let prompt = build_prompt(
            &SourceSnapshot::Vehicle(truck),
            ContentType::SmsBlast,
            "professional",
        );
        assert!(prompt.contains("2022 Toyota Tacoma\n"));
        assert!(!prompt.contains("TRD"));
    }

    #[test]
    fn test_fractional_bathrooms_render_without_padding() {
        let mut condo = miami_condo();
        condo.bathrooms = 2.5;
        let prompt = build_prompt(
            &SourceSnapshot::Property(condo),
            ContentType::ListingDescription,
            "professional",
        );
        assert!(prompt.contains("Baths: 2.5"));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(950000.0), "950,000");
        assert_eq!(format_thousands(1400.0), "1,400");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(1234567.0), "1,234,567");
        assert_eq!(format_thousands(1250.5), "1,250.5");
        assert_eq!(format_thousands(-41500.0), "-41,500");
    }
}
