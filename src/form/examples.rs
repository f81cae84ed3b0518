use crate::ui::view::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleProject {
    /// Also the `project_type` applied to the form.
    pub id: &'static str,
    pub title: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub static EXAMPLE_PROJECTS: [ExampleProject; 4] = [
    ExampleProject {
        id: "ecommerce",
        title: "Plateforme E-commerce",
        label: "E-commerce",
        description: "Je veux créer une plateforme e-commerce complète pour vendre des produits artisanaux avec gestion des stocks, paiements sécurisés, interface d'administration, système de reviews, notifications email et tableau de bord analytique.",
    },
    ExampleProject {
        id: "saas",
        title: "Application SaaS",
        label: "SaaS",
        description: "Je souhaite développer une application SaaS de gestion de projets avec authentification multi-utilisateurs, tableaux de bord personnalisables, système d'abonnements, API REST, notifications en temps réel et intégrations tierces.",
    },
    ExampleProject {
        id: "blog",
        title: "Blog Personnel",
        label: "Blog",
        description: "Je veux créer un blog personnel moderne avec système de gestion de contenu, commentaires, catégories, recherche, SEO optimisé, mode sombre et responsive design pour mobile et desktop.",
    },
    ExampleProject {
        id: "portfolio",
        title: "Portfolio Créatif",
        label: "Portfolio",
        description: "Je souhaite construire un portfolio créatif pour présenter mes projets avec galerie interactive, animations, formulaire de contact, intégration réseaux sociaux et optimisation pour les moteurs de recherche.",
    },
];

pub fn find_example(id: &str) -> Option<&'static ExampleProject> {
    EXAMPLE_PROJECTS.iter().find(|example| example.id == id)
}

pub fn examples_view() -> Element {
    let cards = EXAMPLE_PROJECTS.iter().map(|example| {
        Element::new("div")
            .class("example border border-gray-200 rounded-lg p-6")
            .child(
                Element::new("div")
                    .class("flex items-center justify-between mb-3")
                    .child(Element::new("h4").class("text-lg font-semibold text-gray-900").text(example.title))
                    .child(Element::new("span").class("px-2 py-1 bg-gray-100 text-gray-700 rounded text-sm").text(example.label)),
            )
            .child(Element::new("p").class("text-gray-600 mb-4").text(example.description))
            .child(
                Element::new("button")
                    .class("bg-primary-600 text-white px-4 py-2 rounded-lg")
                    .attr("data-action", "use-example")
                    .attr("data-example", example.id)
                    .text("Utiliser cet exemple"),
            )
    });

    Element::new("div")
        .class("p-8")
        .child(
            Element::new("div")
                .class("flex items-center justify-between mb-6")
                .child(Element::new("h3").class("text-2xl font-bold text-gray-900").text("Exemples de Projets"))
                .child(Element::new("button").attr("data-action", "close-modal").class("text-gray-400")),
        )
        .child(Element::new("div").class("space-y-6").children(cards))
}
