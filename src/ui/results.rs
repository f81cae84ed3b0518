//! Project plan view. Section order: overview, stack, architecture,
//! roadmap, file tree, features, export actions.

use super::view::{Element, Node};
use crate::api::types::*;

pub const EMPTY_RESULTS: &str = "Aucune donnée à afficher";

pub struct ResultsView;

impl ResultsView {
    pub fn render(schema: Option<&ProjectSchema>) -> Node {
        let Some(schema) = schema else {
            return Element::new("p").class("text-red-600").text(EMPTY_RESULTS).into();
        };

        Element::new("div")
            .class("results space-y-8")
            .child(overview(schema))
            .child(recommended_stack(&schema.recommended_stack))
            .child(architecture(&schema.architecture))
            .child(roadmap(&schema.roadmap))
            .child(file_structure(&schema.file_structure))
            .child(features(&schema.features))
            .child(export_options())
            .into()
    }
}

fn section(id: &str, icon: &str, title: &str) -> Element {
    Element::new("div")
        .class("section bg-white rounded-xl shadow-lg p-8 border border-gray-200")
        .attr("data-section", id)
        .child(
            Element::new("h3")
                .class("text-2xl font-bold text-gray-900 mb-6 flex items-center")
                .child(icon_el(icon, "w-6 h-6 mr-3 text-primary-600"))
                .text(title),
        )
}

fn icon_el(name: &str, classes: &str) -> Element {
    Element::new("i").attr("data-lucide", name).class(classes)
}

fn stat(icon: &str, label: &str, value: &str) -> Element {
    Element::new("div")
        .class("stat text-center p-4 bg-gray-50 rounded-lg")
        .child(icon_el(icon, "w-8 h-8 text-gray-600 mx-auto mb-2"))
        .child(Element::new("p").class("text-sm text-gray-600").text(label))
        .child(Element::new("p").class("font-semibold text-gray-900").text(value))
}

fn badge(text: &str, classes: &str) -> Element {
    Element::new("span")
        .class("badge px-3 py-1 rounded-full text-sm font-medium")
        .class(classes)
        .text(text)
}

fn overview(schema: &ProjectSchema) -> Element {
    Element::new("div")
        .class("section bg-white rounded-xl shadow-lg p-8 border border-gray-200")
        .attr("data-section", "overview")
        .child(
            Element::new("div")
                .class("flex items-center justify-between mb-6")
                .child(
                    Element::new("h3")
                        .class("project-name text-2xl font-bold text-gray-900 flex items-center")
                        .child(icon_el("folder", "w-6 h-6 mr-3 text-primary-600"))
                        .text(schema.project_name.as_str()),
                )
                .child(
                    Element::new("div")
                        .class("flex items-center space-x-2")
                        .child(badge(&schema.project_type, "bg-primary-100 text-primary-800"))
                        .child(badge(&schema.complexity, "bg-gray-100 text-gray-800")),
                ),
        )
        .child(
            Element::new("div")
                .class("grid grid-cols-1 md:grid-cols-3 gap-6 mb-6")
                .child(stat("clock", "Durée estimée", &schema.estimated_duration))
                .child(stat("layers", "Complexité", &schema.complexity))
                .child(stat("target", "Type", &schema.project_type)),
        )
        .child(
            Element::new("div")
                .class("bg-gray-50 rounded-lg p-4")
                .child(Element::new("h4").class("font-semibold text-gray-900 mb-2").text("Description"))
                .child(Element::new("p").class("text-gray-700").text(schema.description.as_str())),
        )
}

fn recommended_stack(stack: &RecommendedStack) -> Element {
    section("stack", "layers", "Stack Technologique Recommandée")
        .child(
            Element::new("div")
                .class("grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6 mb-6")
                .child(tech_card("Frontend", &stack.frontend, "monitor"))
                .child(tech_card("Backend", &stack.backend, "server"))
                .child(tech_card("Base de données", &stack.database, "database"))
                .child(tech_card("Déploiement", &stack.deployment, "cloud")),
        )
        .child(
            Element::new("div")
                .class("bg-blue-50 rounded-lg p-4")
                .child(Element::new("h4").class("font-semibold text-blue-900 mb-2").text("Justification"))
                .child(Element::new("p").class("text-blue-800").text(stack.justification.as_str())),
        )
}

fn tech_card(title: &str, tech: &TechnologyRecommendation, icon: &str) -> Element {
    // Cards only have room for the two strongest arguments.
    let pros = tech
        .pros
        .iter()
        .take(2)
        .map(|pro| Element::new("li").text(format!("• {}", pro)));

    Element::new("div")
        .class("tech-card border border-gray-200 rounded-lg p-4")
        .child(
            Element::new("div")
                .class("flex items-center mb-3")
                .child(icon_el(icon, "w-5 h-5 text-primary-600 mr-2"))
                .child(Element::new("h4").class("font-semibold text-gray-900").text(title)),
        )
        .child(Element::new("p").class("tech-name font-medium text-primary-600 mb-2").text(tech.name.as_str()))
        .child(Element::new("p").class("text-sm text-gray-600 mb-3").text(tech.description.as_str()))
        .child(
            Element::new("div")
                .class("space-y-2")
                .child(
                    Element::new("div")
                        .child(Element::new("p").class("text-xs font-medium text-green-600 mb-1").text("Avantages:"))
                        .child(Element::new("ul").class("pros text-xs text-gray-600").children(pros)),
                )
                .child(
                    Element::new("div")
                        .class("flex justify-between text-xs")
                        .child(
                            Element::new("span")
                                .class("text-gray-500")
                                .text("Courbe d'apprentissage: ")
                                .child(Element::new("span").class("font-medium").text(tech.learning_curve.as_str())),
                        )
                        .child(
                            Element::new("span")
                                .class("text-gray-500")
                                .text("Marché: ")
                                .child(Element::new("span").class("font-medium").text(tech.job_market.as_str())),
                        ),
                ),
        )
}

fn architecture(architecture: &Architecture) -> Element {
    let components = architecture.components.iter().map(|component| {
        Element::new("div")
            .class("component border border-gray-200 rounded-lg p-3")
            .child(Element::new("p").class("font-medium text-gray-900").text(component.name.as_str()))
            .child(Element::new("p").class("text-sm text-gray-600").text(component.description.as_str()))
    });

    let flows = architecture.data_flow.iter().map(|flow| {
        Element::new("div")
            .class("data-flow bg-gray-50 rounded-lg p-3")
            .child(Element::new("p").class("text-sm text-gray-700").text(flow.as_str()))
    });

    section("architecture", "git-branch", "Architecture du Projet")
        .child(
            Element::new("div")
                .class("mb-6")
                .child(Element::new("h4").class("font-semibold text-gray-900 mb-3").text("Vue d'ensemble"))
                .child(Element::new("p").class("text-gray-700 bg-gray-50 rounded-lg p-4").text(architecture.overview.as_str())),
        )
        .child(
            Element::new("div")
                .class("grid grid-cols-1 md:grid-cols-2 gap-6")
                .child(
                    Element::new("div")
                        .child(
                            Element::new("h4")
                                .class("font-semibold text-gray-900 mb-3 flex items-center")
                                .child(icon_el("box", "w-4 h-4 mr-2"))
                                .text("Composants"),
                        )
                        .child(Element::new("div").class("space-y-2").children(components)),
                )
                .child(
                    Element::new("div")
                        .child(
                            Element::new("h4")
                                .class("font-semibold text-gray-900 mb-3 flex items-center")
                                .child(icon_el("arrow-right", "w-4 h-4 mr-2"))
                                .text("Flux de données"),
                        )
                        .child(Element::new("div").class("space-y-2").children(flows)),
                ),
        )
}

fn roadmap(roadmap: &Roadmap) -> Element {
    let phases = roadmap.phases.iter().enumerate().map(|(index, phase)| {
        Element::new("div")
            .class("phase border border-gray-200 rounded-lg p-4")
            .child(
                Element::new("div")
                    .class("flex items-center mb-2")
                    .child(
                        Element::new("div")
                            .class("phase-number w-8 h-8 bg-primary-100 text-primary-600 rounded-full flex items-center justify-center font-semibold text-sm mr-3")
                            .text((index + 1).to_string()),
                    )
                    .child(Element::new("h5").class("font-semibold text-gray-900").text(phase.name.as_str()))
                    .child(Element::new("span").class("ml-auto text-sm text-gray-600").text(phase.duration.as_str())),
            )
            .child(Element::new("p").class("text-gray-700 ml-11").text(phase.description.as_str()))
    });

    section("roadmap", "map", "Roadmap de Développement")
        .child(
            Element::new("div").class("mb-6").child(
                Element::new("div")
                    .class("flex items-center justify-between mb-4")
                    .child(
                        Element::new("h4")
                            .class("font-semibold text-gray-900")
                            .text(format!("Durée estimée: {}", roadmap.estimated_duration)),
                    )
                    .child(
                        Element::new("span")
                            .class("text-sm text-gray-600")
                            .text(format!("{} phases", roadmap.phases.len())),
                    ),
            ),
        )
        .child(Element::new("div").class("space-y-4").children(phases))
}

/// Indented plain-text tree, two spaces per level.
pub fn file_tree_text(node: &FileNode) -> String {
    let mut out = String::new();
    write_file_tree(node, 0, &mut out);
    out
}

fn write_file_tree(node: &FileNode, depth: usize, out: &mut String) {
    let icon = match node.kind {
        FileKind::Directory => "📁",
        FileKind::File => "📄",
    };
    out.push_str(&"  ".repeat(depth));
    out.push_str(icon);
    out.push(' ');
    out.push_str(&node.name);
    out.push('\n');

    for child in node.children.iter().flatten() {
        write_file_tree(child, depth + 1, out);
    }
}

fn file_structure(root: &FileNode) -> Element {
    section("file-structure", "folder-tree", "Structure de Fichiers").child(
        Element::new("pre")
            .class("file-tree bg-gray-900 text-gray-100 rounded-lg p-4 font-mono text-sm overflow-x-auto")
            .text(file_tree_text(root)),
    )
}

fn features(features: &[String]) -> Element {
    let items = features.iter().map(|feature| {
        Element::new("div")
            .class("feature flex items-center p-3 bg-gray-50 rounded-lg")
            .child(icon_el("check", "w-5 h-5 text-green-500 mr-3"))
            .child(Element::new("span").class("text-gray-700").text(feature.as_str()))
    });

    section("features", "check-circle", "Fonctionnalités Principales")
        .child(Element::new("div").class("grid grid-cols-1 md:grid-cols-2 gap-4").children(items))
}

fn export_button(action: &str, icon: &str, color: &str, label: &str) -> Element {
    Element::new("button")
        .class("export-button flex items-center justify-center p-4 border border-gray-300 rounded-lg")
        .attr("data-action", action)
        .child(icon_el(icon, &format!("w-5 h-5 mr-2 text-{}-500", color)))
        .child(Element::new("span").class("font-medium").text(label))
}

fn export_options() -> Element {
    section("export", "download", "Options d'Export").child(
        Element::new("div")
            .class("grid grid-cols-1 md:grid-cols-3 gap-4")
            .child(export_button("export-pdf", "file-text", "red", "Export PDF"))
            .child(export_button("export-markdown", "file-code", "blue", "Export Markdown"))
            .child(export_button("export-json", "file-json", "green", "Export JSON")),
    )
}
