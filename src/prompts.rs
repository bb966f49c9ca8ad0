const SUMMARY_PROMPT_TEMPLATE: &str = "You are a research assistant that processes web search results.\n\
\n\
Search Query: {query}\n\
\n\
Search Results:\n\
{search_results}\n\
\n\
Your task is to:\n\
1. Analyze the search results\n\
2. Extract the key information relevant to the query\n\
3. Remove any duplicated or irrelevant information\n\
4. Create a comprehensive yet concise summary of the findings\n\
\n\
Provide your research summary below:\n";

const ANSWER_PROMPT_TEMPLATE: &str = "You are an expert research analyst that creates comprehensive, accurate, and well-cited responses.\n\
\n\
You have been provided with research results about the following query: {query}\n\
\n\
Research summary:\n\
{summary}\n\
\n\
Source documents:\n\
{sources}\n\
\n\
Your task is to:\n\
1. Create a comprehensive answer to the original query using the research provided\n\
2. Include inline citations for all factual claims using the format [Source X] where X is the source number\n\
3. Be objective, thorough, and accurate, relying strictly on the source material\n\
4. Structure your response logically with clear sections and bullet points as needed\n\
5. If the sources conflict, acknowledge this and present both perspectives\n\
6. If the information is insufficient to fully answer the query, clearly state what is missing\n\
\n\
Provide your well-formatted answer below:\n";

pub fn summary_prompt(query: &str, search_results: &str) -> String {
    SUMMARY_PROMPT_TEMPLATE
        .replace("{query}", query)
        .replace("{search_results}", search_results)
}

pub fn answer_prompt(query: &str, summary: &str, sources: &str) -> String {
    ANSWER_PROMPT_TEMPLATE
        .replace("{query}", query)
        .replace("{summary}", summary)
        .replace("{sources}", sources)
}
