use llm_client::ToolDefinition;

pub const RESTAURANT_SEARCH_TOOL: &str = "restaurant_search";

/// System instruction for the parameter-extraction call.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that converts user requests into \
Foursquare API search parameters. Call the restaurant_search function with the extracted \
parameters. Determine location from the user query ('near' field is usually best unless \
coordinates are given). Only use parameters explicitly mentioned or strongly implied by the \
user. Do NOT attempt to filter by minimum rating, as it is not supported.";

/// Tool schema shown to the model, kept to the fields an LLM handles well.
/// The rectangular ne/sw bounds the validator accepts are deliberately not
/// exposed here.
pub fn restaurant_search_tool() -> ToolDefinition {
    ToolDefinition {
        name: RESTAURANT_SEARCH_TOOL.to_string(),
        description: "Search for restaurants using various criteria like location, query, \
                      price, opening hours, etc."
            .to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The type of food or restaurant name (e.g., 'sushi', 'italian', 'Pizza Hut').",
                },
                "ll": {
                    "type": "string",
                    "description": "Latitude,longitude coordinates (e.g., '40.7,-74.0'). Use this OR near, not both.",
                },
                "near": {
                    "type": "string",
                    "description": "A location name to search near (e.g., 'downtown Los Angeles', 'Seattle, WA'). Use this OR ll, not both.",
                },
                "radius": {
                    "type": "integer",
                    "description": "Search radius in meters. Only used with 'll'. Max 100000.",
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of results to return (default 10, max 50).",
                },
                "open_now": {
                    "type": "boolean",
                    "description": "Set to true to only find places currently open.",
                },
                "price": {
                    "type": "string",
                    "description": "Comma-separated list of price tiers (1=cheap, 2=moderate, 3=expensive, 4=very expensive). E.g., '1,2'.",
                },
                "sort": {
                    "type": "string",
                    "enum": ["RELEVANCE", "DISTANCE"],
                    "description": "How to sort results. Defaults to RELEVANCE.",
                },
            },
            "required": [],
        }),
    }
}
