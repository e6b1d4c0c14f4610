use crate::model::{ModuleKey, ModuleSet, PhaseId, PhaseTemplate, StepId, StepTemplate};

/// The five standard phases every new portal starts with.
#[must_use]
pub fn default_phase_templates() -> Vec<PhaseTemplate> {
    vec![
        phase(
            "vetting",
            "Vetting Phase",
            "We verify your contractor's credentials, licensing, and reputation to ensure they're trustworthy before you commit.",
            ModuleKey::Vetting,
            &[
                (
                    "v1",
                    "Initial consultation completed",
                    "We've completed your initial consultation call. During this call, we discussed your project scope, timeline expectations, and gathered information about the contractor(s) you're considering. This helps us tailor our vetting process to your specific situation.",
                ),
                (
                    "v2",
                    "Contractor credentials verified",
                    "We've verified your contractor's business credentials including their business registration, years in operation, and professional certifications. We check multiple databases to ensure they are who they claim to be.",
                ),
                (
                    "v3",
                    "License and insurance confirmed",
                    "We verify that your contractor holds valid state and local licenses required for your type of project. We also confirm they carry adequate liability insurance and workers' compensation coverage to protect you from potential claims.",
                ),
                (
                    "v4",
                    "Reference check completed",
                    "We contact previous clients and review online reputation across multiple platforms. We look for patterns in feedback, how they handle complaints, and verify that positive reviews are authentic.",
                ),
            ],
        ),
        phase(
            "review",
            "Review Phase",
            "We analyze your contract, estimate, and scope of work to identify red flags and ensure fair terms.",
            ModuleKey::Review,
            &[
                (
                    "r1",
                    "Contract review initiated",
                    "Please upload your contract or estimate documents. We'll review them for unfair terms, missing protections, and industry best practices. Upload documents in the 'Your Documents' section.",
                ),
                (
                    "r2",
                    "Scope of work documented",
                    "We've documented the complete scope of work for your project. This includes all tasks, materials, specifications, and deliverables. This document will serve as your reference throughout the project.",
                ),
                (
                    "r3",
                    "Payment terms reviewed",
                    "We analyze the payment schedule to ensure it's fair and protects you. Industry standard is to never pay more than 10% upfront, with payments tied to completed milestones. We'll flag any concerning payment structures.",
                ),
                (
                    "r4",
                    "Timeline approved",
                    "We review the proposed timeline for realism and include recommendations for milestone checkpoints. A well-structured timeline protects both parties and sets clear expectations.",
                ),
            ],
        ),
        phase(
            "design",
            "Design & Material Phase",
            "We help ensure your design choices and material selections are documented and meet quality standards.",
            ModuleKey::Design,
            &[
                (
                    "d1",
                    "Design consultation scheduled",
                    "We'll schedule a design review consultation to discuss your vision, review contractor proposals, and ensure all design elements are clearly specified in writing.",
                ),
                (
                    "d2",
                    "Material selections documented",
                    "All material selections should be documented with specific brands, model numbers, colors, and quantities. This prevents substitutions and ensures you get exactly what you're paying for.",
                ),
                (
                    "d3",
                    "Design approval received",
                    "Final design approval means all drawings, specifications, and material choices are locked in. Changes after this point may incur additional costs, so we ensure everything is right before approval.",
                ),
                (
                    "d4",
                    "Material orders placed",
                    "We verify that material orders match your approved specifications and document delivery timelines. This helps prevent project delays and ensures accountability.",
                ),
            ],
        ),
        phase(
            "inspection",
            "Inspection & Warranty Phase",
            "We coordinate inspections at critical project milestones and ensure warranty documentation is complete.",
            ModuleKey::Inspection,
            &[
                (
                    "i1",
                    "Pre-work inspection completed",
                    "Before work begins, we document the existing condition of your property. This protects you by establishing a baseline and identifying any pre-existing issues that shouldn't be attributed to the contractor.",
                ),
                (
                    "i2",
                    "Mid-project inspection scheduled",
                    "A mid-project inspection catches issues before they're covered up by finishing work. We'll review work quality, adherence to plans, and identify any concerns while corrections are still easy to make.",
                ),
                (
                    "i3",
                    "Final inspection completed",
                    "The final inspection verifies all work is complete, meets specifications, and is free of defects. We document everything and create a punch list of any items requiring attention before final payment.",
                ),
                (
                    "i4",
                    "Warranty documentation collected",
                    "We collect and organize all warranties - manufacturer warranties on materials, contractor workmanship warranties, and any extended warranties. This documentation is crucial for future claims.",
                ),
            ],
        ),
        phase(
            "dispute",
            "Dispute & Completion",
            "We help ensure a smooth project closeout and provide support if any disputes arise.",
            ModuleKey::Dispute,
            &[
                (
                    "dc1",
                    "Final walkthrough scheduled",
                    "The final walkthrough is your opportunity to inspect all completed work with your contractor present. We provide a checklist of items to review and can attend virtually to help identify issues.",
                ),
                (
                    "dc2",
                    "Punch list created",
                    "Any deficiencies or incomplete items identified during the walkthrough are documented on a formal punch list. This list becomes part of the contract and must be resolved before final payment.",
                ),
                (
                    "dc3",
                    "All items resolved",
                    "We track punch list completion and verify that all items have been properly addressed. Only after all issues are resolved should you release final payment.",
                ),
                (
                    "dc4",
                    "Project signed off",
                    "Project sign-off means all work is complete, all punch list items are resolved, warranties are in hand, and you're satisfied with the results. Congratulations on completing your project with Aegis Shield protection!",
                ),
            ],
        ),
    ]
}

fn phase(
    id: &str,
    name: &str,
    description: &str,
    module: ModuleKey,
    steps: &[(&str, &str, &str)],
) -> PhaseTemplate {
    PhaseTemplate {
        id: PhaseId::new(id),
        name: name.to_owned(),
        description: Some(description.to_owned()),
        modules: ModuleSet::from([module]),
        steps: steps
            .iter()
            .map(|(id, name, description)| StepTemplate {
                id: StepId::new(*id),
                name: (*name).to_owned(),
                description: Some((*description).to_owned()),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_phases_of_four_steps_each_owning_their_module() {
        let templates = default_phase_templates();
        assert_eq!(templates.len(), 5);
        for (template, module) in templates.iter().zip(ModuleKey::ALL) {
            assert_eq!(template.steps.len(), 4);
            assert_eq!(template.modules, ModuleSet::from([module]));
            assert_eq!(template.id.as_str(), module.key());
        }
    }
}
