//! The prompt templates behind the content flows.
//!
//! Each constructor binds a prompt string to its output shape. The JSON
//! field instructions in the prompt text must agree with the serde names on
//! the output structs in `flows` — that pairing is the whole contract.

use std::sync::Arc;

use crate::genai::PromptTemplate;

use super::trends::TopicTrends;
use super::{AnalyzedTopic, IdeaBreakdown, IdeaList, Story};

const ANALYZE_TOPIC: &str = "\
You are an expert at understanding user intent. Your task is to analyze the \
user's topic and refine it for a content idea generation system.

The user's topic is: {{{topic}}}

Clarify and enrich this topic. For example, if the user enters \"React\", you \
might refine it to \"The popular JavaScript library for building user \
interfaces, React.js\". If the user enters \"MrBeast\", you might refine it \
to \"The famous YouTuber known for his extravagant stunts and philanthropy, \
MrBeast\".

Respond with a single JSON object with one string field, \"analyzedTopic\", \
containing the refined topic.
";

const GENERATE_IDEAS: &str = "\
You are a creative content strategist. Given a topic, person, or tool, you \
will generate 5 unique and engaging content ideas with brief descriptions. \
If it's a person, consider recent news, controversies, or popular opinions. \
If it's a tool, think about tutorials, comparisons, or interesting use \
cases. Use the getTopicTrends tool to get inspiration from current trends.

Topic: {{{analyzedTopic}}}

Generate 5 unique and engaging content ideas inspired by the topic and \
recent trends, ordered with the most recent and most trending first. Each \
idea should have a title and a brief description.

Respond with a single JSON object containing an \"ideas\" array; each entry \
is an object with string fields \"title\" and \"description\".
";

const EXPAND_IDEA: &str = "\
You are a creative content strategist who excels at providing detailed \
breakdowns for content ideas, focusing on script outlines, thumbnail \
concepts, title suggestions, and video descriptions.

Given the following topic and idea, provide a detailed breakdown:

Topic: {{{topic}}}
Idea: {{{idea}}}

Your breakdown should include:
- A detailed script outline that covers the key points and structure of the \
video. The script outline should be a multi-line string, with each line \
representing a scene or a talking point.
- Creative and engaging thumbnail concepts designed to capture viewer \
attention.
- A list of catchy title suggestions optimized for search and click-through \
rates.
- A compelling video description draft that summarizes the content and \
encourages engagement.

Respond with a single JSON object with string fields \"scriptOutline\", \
\"thumbnailConcepts\", and \"videoDescriptionDraft\", and a \
\"titleSuggestions\" array of strings.
";

const FANTASY_STORY: &str = "\
You are a master storyteller. Your specialty is crafting simple, elegant \
fantasy stories inspired by Indian, Nepali, and Japanese folklore and style.

A user will provide you with a prompt. Your task is to take that prompt and \
expand it into a short, engaging fantasy story.

The story should be straightforward and not overly complex, with a clear \
beginning, middle, and end. It should evoke a sense of wonder, drawing from \
the rich cultural traditions of the specified regions.

User's Prompt: {{{prompt}}}

Craft a simple fantasy story based on this prompt, infused with the style of \
Indian, Nepali, or Japanese folklore. Respond with a single JSON object with \
one string field, \"story\".
";

pub(super) fn analyze_topic() -> PromptTemplate<AnalyzedTopic> {
    PromptTemplate::new("analyzeTopic", ANALYZE_TOPIC)
}

pub(super) fn generate_ideas() -> PromptTemplate<IdeaList> {
    PromptTemplate::new("generateIdeas", GENERATE_IDEAS).with_tool(Arc::new(TopicTrends))
}

pub(super) fn expand_idea() -> PromptTemplate<IdeaBreakdown> {
    PromptTemplate::new("expandIdea", EXPAND_IDEA)
}

pub(super) fn fantasy_story() -> PromptTemplate<Story> {
    PromptTemplate::new("fantasyStory", FANTASY_STORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_render_with_their_variables() {
        assert!(
            analyze_topic()
                .render(&[("topic", "React")])
                .unwrap()
                .contains("The user's topic is: React")
        );
        assert!(
            generate_ideas()
                .render(&[("analyzedTopic", "React.js")])
                .unwrap()
                .contains("Topic: React.js")
        );
        let expanded = expand_idea()
            .render(&[("topic", "React"), ("idea", "5 Hidden React Hooks")])
            .unwrap();
        assert!(expanded.contains("Idea: 5 Hidden React Hooks"));
        assert!(
            fantasy_story()
                .render(&[("prompt", "a talking sword")])
                .unwrap()
                .contains("User's Prompt: a talking sword")
        );
    }

    #[test]
    fn test_idea_prompt_mentions_declared_tool() {
        // The model is told to call the tool by name; keep prompt and
        // registration in sync.
        let rendered = generate_ideas().render(&[("analyzedTopic", "x")]).unwrap();
        assert!(rendered.contains("getTopicTrends"));
    }
}
