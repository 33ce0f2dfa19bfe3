//! Prompt assembly for the two-stage reconciliation protocol
//!
//! Both stages share one control flow; only the instruction templates and
//! source-label set differ between PDF input (three text backends) and
//! DOCX input (HTML + plain text). The literal `SCHEMA_JSON:` and
//! `CONFIDENCE_JSON:` markers in the Stage 1 template are load-bearing:
//! the response parser splits on them.

use docrecon_domain::{DocumentKind, SourceBundle};

/// Literal marker preceding the schema tree in a Stage 1 response
pub const SCHEMA_MARKER: &str = "SCHEMA_JSON:";

/// Literal marker preceding the confidence tree in a Stage 1 response
pub const CONFIDENCE_MARKER: &str = "CONFIDENCE_JSON:";

/// The instruction-template pair for one document kind
#[derive(Debug, Clone, Copy)]
pub struct PromptSet {
    /// Stage 1 instructions (schema + confidence generation)
    pub schema: &'static str,
    /// Stage 2 instructions (final JSON generation)
    pub final_json: &'static str,
}

impl PromptSet {
    /// Template pair for PDF input (OCR / layout / raw-text sources)
    pub fn pdf() -> Self {
        Self {
            schema: SCHEMA_GENERATION_PROMPT,
            final_json: FINAL_JSON_GENERATION_PROMPT,
        }
    }

    /// Template pair for DOCX input (HTML / plain-text sources)
    pub fn docx() -> Self {
        Self {
            schema: SCHEMA_GENERATION_PROMPT_DOCX,
            final_json: FINAL_JSON_GENERATION_PROMPT_DOCX,
        }
    }

    /// Select the template pair for a document kind
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Pdf => Self::pdf(),
            DocumentKind::Docx => Self::docx(),
        }
    }
}

/// Render the bundle as labeled sections, one fixed heading per source
pub fn combine_sources(bundle: &SourceBundle) -> String {
    let mut combined = String::new();
    for entry in bundle.iter() {
        combined.push_str(&format!("# {} Output:\n", heading_for(&entry.label)));
        combined.push_str(&entry.text);
        combined.push_str("\n\n");
    }
    combined
}

fn heading_for(label: &str) -> &str {
    match label {
        "ocr" => "OCR",
        "layout" => "Layout",
        "raw-text" => "Raw Text",
        "html" => "HTML",
        "text" => "Plain Text",
        other => other,
    }
}

/// Assemble the full Stage 1 prompt for a bundle
pub fn schema_prompt(set: &PromptSet, bundle: &SourceBundle) -> String {
    format!(
        "{}\n\nHere are the parsed outputs:\n{}",
        set.schema,
        combine_sources(bundle)
    )
}

/// Assemble the full Stage 2 prompt for a schema string and bundle
pub fn final_prompt(set: &PromptSet, schema_json: &str, bundle: &SourceBundle) -> String {
    format!(
        "{}\n\nHere is the schema JSON:\n{}\n\nHere are the parsed outputs:\n{}",
        set.final_json,
        schema_json,
        combine_sources(bundle)
    )
}

const SCHEMA_GENERATION_PROMPT: &str = r#"You are an expert document analyzer specializing in extracting structured data from business documents. You have received parsed text from multiple extraction methods applied to a PDF. Your task is to create a perfectly structured JSON schema and confidence scores for each field.

## IMPORTANT CONTEXT:
1. You have been given outputs from three different extraction methods: OCR, layout analysis, and raw text extraction
2. Each method may capture different aspects of the document correctly
3. You need to analyze the content to determine the document type and create an appropriate schema

## YOUR TASK:
1. Analyze all three outputs to understand the document's content and structure
2. Create a comprehensive JSON schema that:
   - Accurately represents the document's specific structure and content
   - Captures ALL information present in the document
   - Uses a logical hierarchy with appropriate nesting
   - Has descriptive field names that reflect the actual content
3. Generate a separate confidence score JSON with identical structure but with scores instead of values
4. Return BOTH JSONs in a single response, clearly labeled

## SCHEMA DESIGN PRINCIPLES:
1. Document Type: Include a "documentType" field that describes what kind of document this is
2. Hierarchical Structure: Group related information into nested objects
3. Arrays for Repeated Elements: Use arrays for items that repeat (e.g., order items, specifications)
4. Consistent Naming: Use camelCase for property names
5. Appropriate Data Types: Use the correct data type for each field (string, number, boolean, array, object)
6. Complete Coverage: Ensure ALL information from the document is represented

## CONFIDENCE SCORE GUIDELINES:
- Assign a confidence score from 0.0 to 1.0 for each field
- 1.0: Field value appears consistently across all three extraction methods
- 0.8: Field value appears in two extraction methods
- 0.6: Field value appears in only one extraction method but is clearly correct
- 0.4: Field value is present but with potential inconsistencies
- 0.2: Field value is uncertain or potentially incorrect
- 0.0: Field value is missing or completely uncertain

## OUTPUT FORMAT:
Return TWO separate JSON objects, labeled exactly like this:

SCHEMA_JSON:
{
  "documentType": "[Document Type]",
  "field1": "value1",
  "section": {
    "subfield": "value"
  }
}

CONFIDENCE_JSON:
{
  "documentType": 1.0,
  "field1": 0.8,
  "section": {
    "subfield": 0.6
  }
}

IMPORTANT:
1. Do NOT follow a predefined template - create a schema that best fits THIS specific document
2. Ensure both JSONs have IDENTICAL structure but different values
3. Include ALL information from the document, even unusual or document-specific fields"#;

const FINAL_JSON_GENERATION_PROMPT: &str = r#"You are an expert document data extractor specializing in creating perfectly structured JSON from business documents. You have received:
1. A JSON schema with extracted values from a document
2. Raw parsed text from three different extraction methods

Your task is to create the most accurate and complete JSON representation of the document.

## IMPORTANT CONTEXT:
1. The schema JSON provides the basic structure and initial values
2. The three outputs (OCR, layout analysis, raw text) contain the raw text
3. You need to verify and improve the schema JSON using all available information
4. The schema was specifically designed for this document, so maintain its structure

## GUIDELINES FOR ACCURACY:
1. When values differ between sources, use logical reasoning to determine the most likely correct value
2. For numeric values, convert string numbers to actual numbers (e.g., "52,000" should be 52000) and preserve decimal precision
3. For dates, use a consistent YYYY-MM-DD format where derivable
4. For arrays (like order items or specifications), include every item and keep a consistent structure across items
5. For nested objects, ensure all fields are properly populated
6. If a field is truly missing from all sources, use null or an empty string as appropriate

## OUTPUT FORMAT:
Return ONLY the final JSON object with no additional text or explanations. The JSON should be valid and properly formatted."#;

const SCHEMA_GENERATION_PROMPT_DOCX: &str = r#"You are an expert document analyzer specializing in extracting structured data from business documents. You have received an HTML conversion and a plain-text extraction of a DOCX document. Your task is to create a perfectly structured JSON schema and confidence scores for each field.

## IMPORTANT CONTEXT:
1. The HTML output preserves the document's styling and table structure
2. The plain-text output is a fallback that may order content differently
3. You need to analyze the content to determine the document type and create an appropriate schema

## YOUR TASK:
1. Analyze both outputs to understand the document's content and structure
2. Create a comprehensive JSON schema that accurately represents the document's specific structure and captures ALL information, with a logical hierarchy, camelCase field names, and appropriate data types
3. Include a "documentType" field describing what kind of document this is
4. Generate a separate confidence score JSON with identical structure but with scores instead of values
5. Return BOTH JSONs in a single response, clearly labeled

## CONFIDENCE SCORE GUIDELINES:
- Assign a confidence score from 0.0 to 1.0 for each field
- 1.0: Field value appears consistently across both outputs
- 0.8: Field value appears clearly in one output and is corroborated by context
- 0.6: Field value appears in only one output but is clearly correct
- 0.4: Field value is present but with potential inconsistencies
- 0.2: Field value is uncertain or potentially incorrect
- 0.0: Field value is missing or completely uncertain

## OUTPUT FORMAT:
Return TWO separate JSON objects, labeled exactly like this:

SCHEMA_JSON:
{ ... }

CONFIDENCE_JSON:
{ ... }

IMPORTANT:
1. Do NOT follow a predefined template - create a schema that best fits THIS specific document
2. Ensure both JSONs have IDENTICAL structure but different values"#;

const FINAL_JSON_GENERATION_PROMPT_DOCX: &str = r#"You are an expert document data extractor specializing in creating perfectly structured JSON from business documents. You have received:
1. A JSON schema with extracted values from a DOCX document
2. The document's HTML conversion and plain-text extraction

Your task is to create the most accurate and complete JSON representation of the document.

## GUIDELINES FOR ACCURACY:
1. The schema was specifically designed for this document, so maintain its structure
2. When values differ between the HTML and plain-text outputs, prefer the HTML output for tabular data and use logical reasoning elsewhere
3. Convert string numbers to actual numbers and use YYYY-MM-DD for dates where derivable
4. For arrays, include every item and keep a consistent structure across items
5. If a field is truly missing from both sources, use null or an empty string as appropriate

## OUTPUT FORMAT:
Return ONLY the final JSON object with no additional text or explanations. The JSON should be valid and properly formatted."#;
