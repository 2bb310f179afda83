//! Prompt assembly for the remote estimation engine.
//!
//! Building the prompt is a pure function of the selection and the project
//! context, so it can be tested without any transport. The guideline tables
//! embedded here are the estimation model's pricing rubric; keep them in
//! sync with the sales playbook before changing any number.

use crate::core_types::ProjectContext;

/// System instruction sent alongside every estimation prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a senior technical project estimator. Focus ONLY on the actually selected services and configurations. Never mention services or features that weren't selected. Keep insights specific and relevant to the user's exact selections.";

/// Builds the full estimation prompt from resolved service titles and the
/// current project context.
pub fn build_estimation_prompt(service_titles: &[String], context: &ProjectContext) -> String {
    let context = context.clamped();
    let scope = service_titles.join(", ");
    let description = if context.description.is_empty() {
        "No additional details provided."
    } else {
        context.description.as_str()
    };
    let data_volume = data_volume_label(&context);
    let timeline = format!("{:?}", context.timeline);
    let team_size = format!("{:?}", context.team_size);

    format!(
        r#"Generate a software project estimate using these specific guidelines:

Project Scope:
{scope}

Base Cost Guidelines:
- Design Systems Development: $40k-60k base (complex component libraries and documentation)
- UX, UI Design and Prototyping: $15k-25k base (comprehensive design and validation)
- AI Product Development and Integration: $5k-10k base (initial AI implementation)
- Headless CMS Architectures: $25k-35k base (complex system architecture)
- CMS Theme Development: $20k-30k base (custom theme development)
- Mobile-First Responsive Web Design: $20k-30k base (responsive implementation)
- AI Development Consulting: $5k-15k base (strategic guidance)
- Tech Stack Strategy: $5k-15k base (technology planning)
Note: These are starting points - final estimates consider all factors below.

Timeline Impact:
- Urgent: +35% to total cost (rush fee and resource allocation)
- Normal: No adjustment
- Flexible: -15% from total cost (optimal resource planning)

Data Processing Volume Impact:
- N/A: No impact on cost
- Low: No adjustment
- Medium: +15% to base cost
- High: +30% to base cost

API Integration Costs (only if API integrations > 0):
- First integration: +$15,000
- Each additional: +$8,000 (reduced cost due to existing infrastructure)

System Integration Impact (only if system integration is required):
- If checked: +30% to total cost (complexity of integration)

Team Size Impact:
- Small (1-3): Base cost (efficient communication)
- Medium (4-7): +25% (coordination overhead)
- Large (8+): +45% (significant coordination overhead)

Level of Effort Calculation (1-10 scale):
- User's Complexity Input: {complexity}/10 (weighted 40%)
- Data Volume: {data_volume} (N/A: 0, Low: 2, Medium: 5, High: 8)
- Integration Complexity: {integration}
- API Count: {api_count} (+1 per API up to +3)
- Service Count: {service_count} (+1 per service)

Additional Context:
{description}

Selected Configuration Summary:
- Services Selected: {service_count} ({scope})
- Timeline Priority: {timeline}
- Data Volume: {data_volume}
- API Integrations: {api_count}
- System Integration Required: {integration_flag}
- Team Size: {team_size}
- Complexity Rating: {complexity}/10

Respond with a JSON object containing:
{{
  "timelineRange": "<number>-<number> months",
  "investmentRange": "$<number>k-$<number>k",
  "levelOfEffort": <1-10>,
  "aiInsight": "Provide detailed insights in this format:

1. PRICING BREAKDOWN:
   - Start with the base cost range for each selected service
   - Explain specific adjustments based on the user's inputs (timeline priority, team size, etc.)
   - Detail any additional costs (API integrations, system integration) if applicable
   - Show how these factors led to the final investment range

2. TIMELINE ANALYSIS:
   - Explain the base timeline for the selected services
   - Detail how the chosen {timeline} priority affects the schedule
   - Describe how the selected team size ({team_size}) impacts delivery
   - Note any complexity factors that influence the timeline

3. OPTIMIZATION RECOMMENDATIONS:
   - Provide specific suggestions based on the current configuration
   - If complexity is high ({complexity}/10), suggest ways to manage it
   - If using integrations, recommend efficient implementation approaches
   - Offer relevant tips for the selected service type

Format each point as complete sentences, maintaining a professional tone. Reference specific numbers and percentages when explaining adjustments."
}}

IMPORTANT RULES:
1. Only reference services that were actually selected
2. Never go below the base cost for any service
3. Every insight must directly reference the user's specific inputs
4. Never mention services or integrations that weren't selected
5. Explain how each factor contributed to the final estimate
6. Use concrete numbers and percentages when explaining adjustments
7. Keep insights factual and directly tied to the estimation model
8. Maintain a professional, consultative tone

Examples:
- Design Systems Development alone: "3-4 months", "$40k-$60k"
- Mobile-First Web Design: "2-3 months", "$20k-$30k"
- UX/UI Design and Prototyping: "1-2 months", "$15k-$25k"
- AI Development Consulting: "1-2 months", "$5k-$15k""#,
        scope = scope,
        complexity = context.complexity,
        data_volume = data_volume,
        integration = if context.system_integration {
            "Yes (+2)"
        } else {
            "No"
        },
        integration_flag = if context.system_integration { "Yes" } else { "No" },
        api_count = context.api_integrations,
        service_count = service_titles.len(),
        description = description,
        timeline = timeline,
        team_size = team_size,
    )
}

fn data_volume_label(context: &ProjectContext) -> &'static str {
    use crate::core_types::DataVolume;
    match context.data_volume {
        DataVolume::NotApplicable => "N/A",
        DataVolume::Low => "Low",
        DataVolume::Medium => "Medium",
        DataVolume::High => "High",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{DataVolume, TeamSize, Timeline};

    fn titles() -> Vec<String> {
        vec![
            "Design System Development".to_string(),
            "AI Integration".to_string(),
        ]
    }

    #[test]
    fn test_prompt_embeds_scope_and_counts() {
        let prompt = build_estimation_prompt(&titles(), &ProjectContext::default());
        assert!(prompt.contains("Project Scope:\nDesign System Development, AI Integration"));
        assert!(prompt.contains("Services Selected: 2 (Design System Development, AI Integration)"));
    }

    #[test]
    fn test_prompt_embeds_context_fields() {
        let context = ProjectContext {
            complexity: 8,
            timeline: Timeline::Urgent,
            data_volume: DataVolume::High,
            team_size: TeamSize::Large,
            system_integration: true,
            api_integrations: 3,
            description: "Greenfield rebuild of the storefront.".to_string(),
        };
        let prompt = build_estimation_prompt(&titles(), &context);
        assert!(prompt.contains("Complexity Rating: 8/10"));
        assert!(prompt.contains("Timeline Priority: Urgent"));
        assert!(prompt.contains("Data Volume: High"));
        assert!(prompt.contains("API Integrations: 3"));
        assert!(prompt.contains("System Integration Required: Yes"));
        assert!(prompt.contains("Integration Complexity: Yes (+2)"));
        assert!(prompt.contains("Team Size: Large"));
        assert!(prompt.contains("Greenfield rebuild of the storefront."));
    }

    #[test]
    fn test_prompt_carries_guideline_tables() {
        let prompt = build_estimation_prompt(&titles(), &ProjectContext::default());
        assert!(prompt.contains("Base Cost Guidelines:"));
        assert!(prompt.contains("Timeline Impact:"));
        assert!(prompt.contains("First integration: +$15,000"));
        assert!(prompt.contains("Large (8+): +45%"));
    }

    #[test]
    fn test_empty_description_uses_placeholder() {
        let prompt = build_estimation_prompt(&titles(), &ProjectContext::default());
        assert!(prompt.contains("No additional details provided."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let context = ProjectContext::default();
        let first = build_estimation_prompt(&titles(), &context);
        let second = build_estimation_prompt(&titles(), &context);
        assert_eq!(first, second);
    }

    #[test]
    fn test_prompt_requests_json_reply_shape() {
        let prompt = build_estimation_prompt(&titles(), &ProjectContext::default());
        assert!(prompt.contains("\"timelineRange\""));
        assert!(prompt.contains("\"investmentRange\""));
        assert!(prompt.contains("\"levelOfEffort\""));
        assert!(prompt.contains("\"aiInsight\""));
    }
}
