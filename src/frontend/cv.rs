use yew::prelude::*;

use super::globe::GlobeWidget;
use crate::globe::GlobeAppearance;
use crate::site::{CONTACT_EMAIL, OWNER_NAME};

const LOCATION_GLOBE_SIZE: f64 = 96.0;

struct Entry {
    title: &'static str,
    place: &'static str,
    period: &'static str,
    summary: &'static str,
}

const EXPERIENCE: [Entry; 2] = [
    Entry {
        title: "Senior Frontend Developer",
        place: "Company Name",
        period: "2023 - Present",
        summary: "Leading frontend development projects using React, TypeScript, and modern web technologies. Collaborating with cross-functional teams to deliver high-quality user experiences.",
    },
    Entry {
        title: "Frontend Developer",
        place: "Previous Company",
        period: "2021 - 2023",
        summary: "Developed and maintained web applications, implemented responsive designs, and optimized performance for better user experience.",
    },
];

const EDUCATION: Entry = Entry {
    title: "Computer Science Degree",
    place: "University Name",
    period: "2018 - 2021",
    summary: "Bachelor's degree in Computer Science with focus on web development and software engineering.",
};

const SKILL_GROUPS: [(&str, &[&str]); 2] = [
    (
        "Frontend Technologies",
        &["React", "TypeScript", "Next.js", "Tailwind CSS", "HTML5", "CSS3"],
    ),
    (
        "Tools & Others",
        &["Git", "Figma", "Webpack", "Node.js", "REST APIs", "GraphQL"],
    ),
];

fn entry(entry: &Entry) -> Html {
    html! {
        <div class="cv-entry">
            <h3>{entry.title}</h3>
            <p class="cv-entry__meta">{format!("{} • {}", entry.place, entry.period)}</p>
            <p class="cv-entry__summary">{entry.summary}</p>
        </div>
    }
}

#[function_component(CvPage)]
pub fn cv_page() -> Html {
    let (first, last) = OWNER_NAME;

    html! {
        <main class="cv-page">
            <a href="/" class="cv-back" aria-label="Back to portfolio">{"←"}</a>
            <div class="cv-content">
                <header class="cv-header">
                    <h1><span class="text-accent">{first}</span>{" "}{last}</h1>
                    <p class="cv-role">{"Frontend Developer"}</p>
                    <div class="cv-contact">
                        <span>{"✉ "}{CONTACT_EMAIL}</span>
                        <span>{"🌐 jespersjostrom.se"}</span>
                        <span class="cv-location">
                            <GlobeWidget
                                width={LOCATION_GLOBE_SIZE}
                                height={LOCATION_GLOBE_SIZE}
                                appearance={GlobeAppearance::dark()}
                                class="cv-location__globe"
                            />
                            {"Stockholm, Sweden"}
                        </span>
                    </div>
                </header>

                <section class="cv-section">
                    <h2>{"Experience"}</h2>
                    { for EXPERIENCE.iter().map(entry) }
                </section>

                <section class="cv-section">
                    <h2>{"Skills"}</h2>
                    <div class="cv-skills">
                        { for SKILL_GROUPS.iter().map(|(group, skills)| html! {
                            <div>
                                <h3>{*group}</h3>
                                <div class="cv-skill-list">
                                    { for skills.iter().map(|skill| html! {
                                        <span key={*skill} class="skill-pill">{*skill}</span>
                                    }) }
                                </div>
                            </div>
                        }) }
                    </div>
                </section>

                <section class="cv-section">
                    <h2>{"Education"}</h2>
                    {entry(&EDUCATION)}
                </section>
            </div>
        </main>
    }
}
