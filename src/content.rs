use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use crate::scroll::{LayerCurves, Parallax};

#[derive(Debug, Clone, Deserialize)]
pub struct Content {
    pub profile: Profile,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub social_works: Vec<SocialWork>,
    pub contact: Contact,
    #[serde(default)]
    pub parallax: LayerCurves,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    pub roles: Vec<String>,
    #[serde(default)]
    pub photos: Vec<PathBuf>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub location: Option<String>,
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocialWork {
    pub organization: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Content {
    pub fn from_toml(raw: &str) -> Result<Self> {
        let content: Content = toml::from_str(raw).context("invalid content file")?;
        content.validate()?;
        Ok(content)
    }

    /// Reads a content file. Relative photo paths resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read content file {}", path.display()))?;
        let mut content = Self::from_toml(&raw)
            .with_context(|| format!("failed to load content file {}", path.display()))?;
        if let Some(base) = path.parent() {
            for photo in content.profile.photos.iter_mut() {
                if photo.is_relative() {
                    *photo = base.join(&*photo);
                }
            }
        }
        Ok(content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.profile.name.trim().is_empty() {
            bail!("profile name must not be empty");
        }
        if self.profile.roles.is_empty() {
            bail!("profile needs at least one role to rotate through");
        }
        Parallax::with_layers(&self.parallax).context("invalid [parallax] curves")?;
        Ok(())
    }

    pub fn skill_count(&self) -> usize {
        self.skills.iter().map(|group| group.skills.len()).sum()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl Default for Content {
    fn default() -> Self {
        Self {
            profile: Profile {
                name: "Alex Doe".to_string(),
                tagline: "Building intelligent tools, scalable web applications and \
                          whatever sits between the two."
                    .to_string(),
                roles: strings(&["AI/ML Engineer", "Web Developer", "FullStack Developer", "Python Dev"]),
                photos: Vec::new(),
                resume_url: Some("https://example.com/alex-doe-resume.pdf".to_string()),
            },
            experience: vec![
                Experience {
                    title: "Application Development Intern".to_string(),
                    company: "Northwind Systems".to_string(),
                    period: "May 2024 - July 2024".to_string(),
                    location: Some("Bangalore".to_string()),
                    description: "Built secure internal applications and worked with \
                                  cross-functional teams on delivery."
                        .to_string(),
                    skills: strings(&["Python", "Application Development", "Security"]),
                },
                Experience {
                    title: "Fullstack Developer Intern".to_string(),
                    company: "Contoso Labs".to_string(),
                    period: "January 2024 - March 2024".to_string(),
                    location: Some("Remote".to_string()),
                    description: "Implemented REST APIs and wired them into the web frontend.".to_string(),
                    skills: strings(&["Java", "Spring Boot", "React", "REST APIs"]),
                },
            ],
            projects: vec![
                Project {
                    title: "Personalized Chatbot".to_string(),
                    description: "Conversational assistant with NLP pipelines tuned on custom data.".to_string(),
                    tech: strings(&["Python", "NLP", "TensorFlow"]),
                    repository: Some("https://example.com/alex/chatbot".to_string()),
                    demo: Some("https://example.com/alex/chatbot/demo".to_string()),
                },
                Project {
                    title: "Virtual Mouse".to_string(),
                    description: "Gesture-controlled pointer driven by hand tracking.".to_string(),
                    tech: strings(&["Python", "OpenCV", "MediaPipe"]),
                    repository: Some("https://example.com/alex/virtual-mouse".to_string()),
                    demo: Some("https://example.com/alex/virtual-mouse/demo".to_string()),
                },
                Project {
                    title: "GenAI Workflow Automation".to_string(),
                    description: "Automated workflows combining generative models with a workflow engine.".to_string(),
                    tech: strings(&["GenAI", "n8n", "API Integration"]),
                    repository: None,
                    demo: None,
                },
                Project {
                    title: "Drone Navigation System".to_string(),
                    description: "Autonomous navigation using computer vision and learned obstacle avoidance.".to_string(),
                    tech: strings(&["Python", "Computer Vision", "ML"]),
                    repository: None,
                    demo: None,
                },
            ],
            skills: vec![
                SkillGroup { category: "Programming".to_string(), skills: strings(&["Python 3", "JavaScript", "Embedded C", "C++"]) },
                SkillGroup { category: "ML Frameworks".to_string(), skills: strings(&["PyTorch", "TensorFlow", "Scikit-learn"]) },
                SkillGroup { category: "NLP/GenAI".to_string(), skills: strings(&["Transformers", "GPT models", "Gemini"]) },
                SkillGroup { category: "Data Handling".to_string(), skills: strings(&["Pandas", "NumPy", "SQL", "Polars"]) },
                SkillGroup { category: "APIs & Deployment".to_string(), skills: strings(&["REST APIs", "Docker"]) },
                SkillGroup { category: "Cloud & Tools".to_string(), skills: strings(&["AWS", "Git", "Jupyter", "VS Code"]) },
                SkillGroup { category: "Others".to_string(), skills: strings(&["OpenCV", "MediaPipe", "Raspberry Pi", "Jetson"]) },
            ],
            social_works: vec![
                SocialWork {
                    organization: "Community Learning NGO".to_string(),
                    roles: strings(&["City Leader"]),
                    description: "Organizing educational programs for children through technology.".to_string(),
                },
                SocialWork {
                    organization: "Students Guidance Cell".to_string(),
                    roles: strings(&["Core Member (2021-2024)", "Technical Head (2023-2024)"]),
                    description: "Mentoring students, running workshops and helping peers plan their careers.".to_string(),
                },
            ],
            contact: Contact {
                email: "alex@example.com".to_string(),
                phone: None,
                location: Some("Bangalore, India".to_string()),
                links: vec![
                    Link { label: "GitHub".to_string(), url: "https://github.com/alex-doe".to_string() },
                    Link { label: "LinkedIn".to_string(), url: "https://linkedin.com/in/alex-doe".to_string() },
                ],
            },
            parallax: LayerCurves::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [profile]
        name = "Sam Example"
        tagline = "Systems programmer"
        roles = ["Rust Developer", "Tinkerer"]
        photos = ["me.jpg"]

        [[projects]]
        title = "Parser"
        description = "A parser"
        tech = ["Rust"]

        [[skills]]
        category = "Languages"
        skills = ["Rust", "C"]

        [contact]
        email = "sam@example.com"

        [[contact.links]]
        label = "GitHub"
        url = "https://github.com/sam"
    "#;

    #[test]
    fn parses_minimal_file() {
        let content = Content::from_toml(MINIMAL).expect("content");
        assert_eq!(content.profile.roles.len(), 2);
        assert_eq!(content.projects[0].repository, None);
        assert!(content.experience.is_empty());
        assert_eq!(content.skill_count(), 2);
        assert_eq!(content.contact.links[0].label, "GitHub");
    }

    #[test]
    fn rejects_profile_without_roles() {
        let raw = MINIMAL.replace(r#"roles = ["Rust Developer", "Tinkerer"]"#, "roles = []");
        let err = Content::from_toml(&raw).expect_err("no roles");
        assert!(err.to_string().contains("role"));
    }

    #[test]
    fn rejects_missing_contact() {
        let raw = MINIMAL.split("[contact]").next().expect("head").to_string();
        assert!(Content::from_toml(&raw).is_err());
    }

    #[test]
    fn load_resolves_photos_next_to_file() {
        let dir = std::env::temp_dir().join(format!("folio_content_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("content.toml");
        fs::write(&path, MINIMAL).expect("write");

        let content = Content::load(&path).expect("load");
        assert_eq!(content.profile.photos, vec![dir.join("me.jpg")]);

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn parallax_table_overrides_layers() {
        let raw = format!("{MINIMAL}\n[parallax]\ngrid = [[0.0, 0.0], [1.0, 20]]\n");
        let content = Content::from_toml(&raw).expect("content");
        assert_eq!(content.parallax.grid, Some(vec![(0.0, 0.0), (1.0, 20.0)]));
        assert_eq!(content.parallax.scale, None);
    }

    #[test]
    fn rejects_decreasing_parallax_curve() {
        let raw = format!("{MINIMAL}\n[parallax]\nscale = [[0.0, 1.0], [0.8, 1.2], [0.4, 0.9]]\n");
        let err = Content::from_toml(&raw).expect_err("bad curve");
        let message = format!("{err:#}");
        assert!(message.contains("parallax"), "{message}");
        assert!(message.contains("control point 2"), "{message}");
    }

    #[test]
    fn rejects_unknown_parallax_layer() {
        let raw = format!("{MINIMAL}\n[parallax]\nfog = [[0.0, 1.0]]\n");
        assert!(Content::from_toml(&raw).is_err());
    }

    #[test]
    fn built_in_content_is_valid() {
        let content = Content::default();
        content.validate().expect("valid");
        assert_eq!(content.profile.roles.len(), 4);
    }
}
