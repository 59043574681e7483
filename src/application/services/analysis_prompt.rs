/// Build the structured-extraction prompt for one contract.
///
/// The embedded schema is a versioned contract with the response parser:
/// renaming a field or changing its type here is a breaking change there.
pub fn build_analysis_prompt(contract_text: &str) -> String {
    format!(
        r#"You are an expert warranty contract analyzer. Analyze the following warranty document and extract key information.

WARRANTY CONTRACT TEXT:
---
{contract_text}
---

Extract and structure the following information. Return your response as valid JSON matching this exact schema:

{{
  "summary": "Plain language summary (2-3 sentences explaining what this warranty covers)",
  "duration": "Warranty duration as written (e.g., '24 months', '2 years', 'lifetime')",
  "duration_months": <number of months or null if lifetime/unclear>,
  "coverage_items": ["List of what IS covered", "..."],
  "exclusions": ["List of what is NOT covered", "..."],
  "limitations": ["List of conditions/limitations", "..."],
  "claim_procedure": "Step-by-step procedure for filing claims",
  "claim_contacts": {{
    "phone": "phone number or null",
    "email": "email address or null",
    "website": "website URL or null",
    "address": "mailing address or null"
  }},
  "required_docs": ["Documents needed to file claim", "..."],
  "critical_dates": [
    {{
      "date": "YYYY-MM-DD or description",
      "description": "what this date represents",
      "type": "registration_deadline|expiry|inspection_required|other"
    }}
  ],
  "transferable": true/false/null,
  "extended_options": "Information about extended warranty options or null",
  "critical_highlights": [
    {{
      "text": "Critical information user MUST know",
      "category": "critical",
      "icon": "🔴",
      "importance": 5
    }}
  ],
  "warning_highlights": [
    {{
      "text": "Important warnings or exclusions",
      "category": "warning",
      "icon": "⚠️",
      "importance": 4
    }}
  ],
  "info_highlights": [
    {{
      "text": "Useful information",
      "category": "info",
      "icon": "✅",
      "importance": 3
    }}
  ],
  "confidence_score": <0.0-1.0, your confidence in the extraction accuracy>
}}

IMPORTANT INSTRUCTIONS:
1. Extract ALL relevant information from the warranty text
2. Be specific - include actual deadlines, contact info, procedures
3. Categorize highlights appropriately:
   - CRITICAL: Deadlines, registration requirements, conditions that void warranty
   - WARNING: Major exclusions, limitations, things that aren't covered
   - INFO: Covered items, how to file claims, contact information
4. For duration_months: convert any time period to months (1 year = 12, lifetime = null)
5. For dates: extract any specific dates or calculate based on "from purchase date"
6. Confidence score should reflect how complete and clear the extracted information is
7. Use null for any fields where information is not available
8. Return ONLY valid JSON, no other text

Analyze the warranty now and return the JSON:"#
    )
}
