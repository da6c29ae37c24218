//! Fixed portfolio text served by the informational commands

use super::output::Output;

pub const OWNER: &str = "John Doe";

pub fn welcome(title: &str) -> Output {
    Output::new()
        .with_accent(format!("{} - Easter Egg", title))
        .with_text("Type 'help' to see available commands.")
}

pub fn about() -> Output {
    Output::new()
        .with_accent(OWNER)
        .with_text("Fullstack Developer & DevOps Engineer with over 5 years of experience.")
        .with_text(
            "I build web applications and cloud solutions on top of modern technology.",
        )
        .with_text(
            "My goal is shipping high quality software that is scalable, fast and easy to maintain.",
        )
}

pub fn projects() -> Output {
    Output::new()
        .with_heading("My projects:")
        .with_entry(
            "Cloud Native Application",
            "Scalable microservice application with a complete CI/CD pipeline.",
        )
        .with_entry(
            "E-Commerce Platform",
            "Online store with product management and payments.",
        )
        .with_entry(
            "DevOps Monitoring Dashboard",
            "Real-time infrastructure monitoring system.",
        )
        .with_text("Type cd /projects to see project details.")
}

pub fn contact() -> Output {
    Output::new()
        .with_heading("Contact information:")
        .with_entry("Email:", "contact@example.com")
        .with_entry("GitHub:", "github.com/johndoe")
        .with_entry("LinkedIn:", "linkedin.com/in/johndoe")
        .with_entry("Twitter:", "twitter.com/johndoe")
}

pub fn skills() -> Output {
    Output::new()
        .with_heading("Skills:")
        .with_entry("Frontend:", "React, Next.js, TypeScript, TailwindCSS")
        .with_entry("Backend:", "Node.js, Express, NestJS, Python, Go")
        .with_entry(
            "DevOps:",
            "Docker, Kubernetes, Terraform, GitHub Actions, Jenkins",
        )
        .with_entry("Cloud:", "AWS, Google Cloud, Azure, Serverless")
}

/// Hero text shown on the landing screen, as markdown
pub const LANDING: &str = "\
# Hi, I'm John Doe

**I build modern digital experiences**

I specialize in modern, fast and scalable web applications built on current \
technology, and in shipping advanced *DevOps* solutions.
";
