//! The fixed deck: one record per slide, in display order.

use crate::ooxml::pptx::SlideLayout;

/// Title and body text of one slide and the layout it is allocated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideRecord {
    pub title: &'static str,
    /// Each `\n` starts a new paragraph.
    pub body: &'static str,
    pub layout: SlideLayout,
}

/// Document title recorded in the package properties.
pub const DECK_TITLE: &str = "Microservices TODO Application";

/// Number of slides in [`DECK`].
pub const DECK_LEN: usize = 12;

pub static DECK: [SlideRecord; DECK_LEN] = [
    SlideRecord {
        title: "Microservices TODO Application",
        body: concat!(
            "Containerized, Automated & Secure Deployment\n",
            "\n",
            "Complete DevOps Pipeline Implementation\n",
            "Terraform + Ansible + Docker + CI/CD + Drift Detection",
        ),
        layout: SlideLayout::Title,
    },
    SlideRecord {
        title: "System Architecture Overview",
        body: concat!(
            "6 Microservices in Different Languages:\n",
            "• Frontend (Vue.js)\n",
            "• Auth API (Go) \n",
            "• Todos API (Node.js)\n",
            "• Users API (Java Spring Boot)\n",
            "• Log Processor (Python)\n",
            "• Redis Queue\n",
            "\n",
            "Key Features:\n",
            "• Traefik Reverse Proxy with SSL termination\n",
            "• Docker Containerization for all services\n",
            "• Redis for message queuing",
        ),
        layout: SlideLayout::TitleAndContent,
    },
    SlideRecord {
        title: "PART 1: Application Containerization",
        body: concat!(
            "Implementation Flow:\n",
            "• Individual Dockerfiles for each service\n",
            "• Docker Compose orchestrates all services  \n",
            "• Traefik Proxy handles SSL + Routing\n",
            "\n",
            "Single Command Deployment:\n",
            "docker compose up -d\n",
            "\n",
            "HTTPS Endpoints:\n",
            "• https://your-domain.com\n",
            "• https://your-domain.com/api/auth\n",
            "• https://your-domain.com/api/todos\n",
            "• https://your-domain.com/api/users\n",
            "\n",
            "Features:\n",
            "• Automatic SSL with Let's Encrypt certificates\n",
            "• HTTP → HTTPS automatic redirection",
        ),
        layout: SlideLayout::TitleAndContent,
    },
    SlideRecord {
        title: "PART 2: Infrastructure & Automation",
        body: concat!(
            "Three Main Components:\n",
            "\n",
            "Terraform:\n",
            "• AWS EC2 provisioning\n",
            "• Security groups configuration\n",
            "• Remote state management (S3)\n",
            "• Dynamic Ansible inventory generation\n",
            "\n",
            "Ansible:\n",
            "• Dependencies role (Docker, Git, packages)\n",
            "• Deploy role (app deployment, SSL setup)\n",
            "• Idempotent operations\n",
            "\n",
            "CI/CD:\n",
            "• GitHub Actions workflows\n",
            "• Drift detection with email alerts\n",
            "• Automated deployment pipelines",
        ),
        layout: SlideLayout::TitleAndContent,
    },
    SlideRecord {
        title: "Terraform: Idempotent Infrastructure",
        body: concat!(
            "Key Components:\n",
            "• main.tf: EC2 instances + Security Groups\n",
            "• Remote State: S3 Backend for team collaboration\n",
            "• Dynamic Inventory: Auto-generated for Ansible\n",
            "\n",
            "Automatic Ansible Execution:\n",
            "resource \"null_resource\" \"run_ansible\" {\n",
            "  provisioner \"local-exec\" {\n",
            "    command = \"ansible-playbook -i inventory.ini site.yml\"\n",
            "  }\n",
            "}\n",
            "\n",
            "Features:\n",
            "• Fully idempotent operations\n",
            "• No resource recreation unless drift occurs\n",
            "• Automatic integration with Ansible",
        ),
        layout: SlideLayout::TitleAndContent,
    },
    SlideRecord {
        title: "Ansible: Server Configuration & Deployment",
        body: concat!(
            "Dependencies Role:\n",
            "• Docker & Docker Compose installation\n",
            "• Git and system packages\n",
            "• User permissions and groups\n",
            "\n",
            "Deploy Role:\n",
            "• Repository cloning and updates\n",
            "• Container management with Docker Compose\n",
            "• SSL configuration and health checks\n",
            "\n",
            "Key Features:\n",
            "• Idempotent Deployment: No restart unless files changed\n",
            "• Git Integration: Automatic repo cloning and updates\n",
            "• Container Orchestration: Full Docker Compose management",
        ),
        layout: SlideLayout::TitleAndContent,
    },
    SlideRecord {
        title: "CI/CD: Automated Deployment Pipeline",
        body: concat!(
            "Two Workflow Types:\n",
            "\n",
            "Infrastructure Workflow:\n",
            "• Triggers on infra/terraform/** changes\n",
            "• Triggers on infra/ansible/** changes\n",
            "\n",
            "Application Workflow:\n",
            "• Triggers on service code changes\n",
            "• Triggers on docker-compose.yml changes\n",
            "\n",
            "Key Features:\n",
            "• Drift Detection: terraform plan → email alert → manual approval\n",
            "• Conditional Deployment: Only runs if changes detected\n",
            "• Email Notifications: Automatic alerts for infrastructure drift",
        ),
        layout: SlideLayout::TitleAndContent,
    },
    SlideRecord {
        title: "Drift Detection & Safety Mechanism",
        body: concat!(
            "5-Step Safety Process:\n",
            "\n",
            "1. Plan Check: terraform plan -detailed-exitcode\n",
            "2. Drift Detection: Exit code = 2 indicates changes\n",
            "3. Email Alert: Notify stakeholders, pause pipeline\n",
            "4. Manual Approval: GitHub Environment protection\n",
            "5. Apply Changes: terraform apply only after approval\n",
            "\n",
            "Safety Rules:\n",
            "• No Drift = Automatic Proceed\n",
            "• Drift Detected = Email + Manual Approval Required\n",
            "\n",
            "This ensures complete transparency and control over infrastructure changes.",
        ),
        layout: SlideLayout::TitleAndContent,
    },
    SlideRecord {
        title: "Security Implementation",
        body: concat!(
            "Multi-Layer Security Approach:\n",
            "\n",
            "Network Security:\n",
            "• AWS Security Groups with minimal port exposure\n",
            "• SSH key-based authentication\n",
            "• Only ports 22, 80, 443 exposed\n",
            "\n",
            "SSL/TLS Security:\n",
            "• Let's Encrypt certificates with automatic renewal\n",
            "• HTTP → HTTPS automatic redirection\n",
            "• Traefik handles SSL termination\n",
            "\n",
            "Application Security:\n",
            "• JWT token authentication\n",
            "• API authorization middleware\n",
            "• Container isolation and network segmentation",
        ),
        layout: SlideLayout::TitleAndContent,
    },
    SlideRecord {
        title: "PART 3: Single Command Deployment",
        body: concat!(
            "Complete Stack Deployment:\n",
            "terraform apply -auto-approve\n",
            "\n",
            "5-Step Automated Process:\n",
            "1. Provision: AWS EC2 + Security Groups\n",
            "2. Generate: Ansible inventory file\n",
            "3. Configure: Install all dependencies\n",
            "4. Deploy: Application containers\n",
            "5. Secure: Traefik + SSL setup\n",
            "\n",
            "Benefits:\n",
            "• Fully Automated: Zero manual intervention required\n",
            "• Idempotent: Skip unchanged resources\n",
            "• Production Ready: HTTPS endpoints immediately available",
        ),
        layout: SlideLayout::TitleAndContent,
    },
    SlideRecord {
        title: "Key Benefits & Achievements",
        body: concat!(
            "🚀 Automation:\n",
            "• Single command deployment\n",
            "• Zero manual configuration\n",
            "• Automatic SSL setup\n",
            "\n",
            "🛡️ Safety:\n",
            "• Infrastructure drift detection\n",
            "• Email notifications for changes\n",
            "• Manual approval gates\n",
            "\n",
            "🔄 Reliability:\n",
            "• Idempotent operations\n",
            "• Remote state management\n",
            "• Rollback capability\n",
            "\n",
            "📈 Scalability:\n",
            "• Microservices architecture\n",
            "• Container orchestration\n",
            "• Cloud-native design",
        ),
        layout: SlideLayout::TitleAndContent,
    },
    SlideRecord {
        title: "Live Demonstration & Questions",
        body: concat!(
            "Ready to Deploy!\n",
            "\n",
            "Commands to Execute:\n",
            "cd infra/terraform\n",
            "terraform apply -auto-approve\n",
            "\n",
            "Application Access:\n",
            "• https://your-domain.com\n",
            "• https://your-domain.com/api/auth\n",
            "• https://your-domain.com/api/todos\n",
            "• https://your-domain.com/api/users\n",
            "\n",
            "Questions & Discussion\n",
            "Thank you for your attention!",
        ),
        layout: SlideLayout::TitleAndContent,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_shape() {
        assert_eq!(DECK.len(), 12);
        assert_eq!(DECK[0].layout, SlideLayout::Title);
        assert!(
            DECK[1..]
                .iter()
                .all(|record| record.layout == SlideLayout::TitleAndContent)
        );
        assert!(
            DECK.iter()
                .all(|record| !record.title.is_empty() && !record.body.is_empty())
        );
        assert_eq!(DECK[0].title, DECK_TITLE);
    }

    #[test]
    fn test_text_kept_verbatim() {
        assert!(DECK[1].body.contains("• Auth API (Go) \n"));
        assert!(DECK[2].body.contains("orchestrates all services  \n"));
        assert!(DECK[2].body.ends_with("• HTTP → HTTPS automatic redirection"));
        assert!(DECK[10].body.starts_with("🚀 Automation:\n"));
        assert_eq!(DECK[11].title, "Live Demonstration & Questions");
    }
}
