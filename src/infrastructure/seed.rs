//! Demo content for the database-less mode
//!
//! When no `DATABASE_URL` is configured the server runs on the
//! in-memory store, seeded with the same demo accounts and sample
//! project the original portal shipped with. All demo accounts use the
//! password `demo123`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::domain::catalog::{PortfolioItem, Service};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::project::{NewProject, Project, ProjectUpdate, ProjectStatus};
use crate::domain::repositories::{ProjectRepository, UserRepository};
use crate::domain::user::{Email, Role, User};

const DEMO_PASSWORD: &str = "demo123";

fn demo_user(name: &str, email: &str, role: Role, company: Option<&str>) -> DomainResult<User> {
    Ok(User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: Email::new(email).map_err(DomainError::Storage)?,
        password_hash: hash_password(DEMO_PASSWORD).map_err(DomainError::Storage)?,
        role,
        company: company.map(str::to_string),
        avatar: Some(format!(
            "https://ui-avatars.com/api/?name={}",
            name.replace(' ', "+")
        )),
    })
}

/// Seeds the demo accounts and the sample project
pub async fn seed_demo_data(
    users: &dyn UserRepository,
    projects: &dyn ProjectRepository,
) -> DomainResult<()> {
    let admin = demo_user("Admin Toda Arte", "admin@todaarte.com", Role::Admin, None)?;
    let joao = demo_user(
        "João Silva",
        "joao@empresa.com",
        Role::Client,
        Some("Empresa XYZ"),
    )?;
    let lara = demo_user("Lara", "lara@todaarte.com", Role::Admin, None)?;
    let thaty = demo_user("Thaty", "thaty@todaarte.com", Role::Admin, None)?;

    users.create(&admin).await?;
    users.create(&joao).await?;
    users.create(&lara).await?;
    users.create(&thaty).await?;

    // The sample project sits in review with one admin comment, ready
    // for the demo client to approve or send back.
    let mut project = Project::open(NewProject {
        title: "Redesign da Marca".into(),
        description: "Modernização da identidade visual da empresa".into(),
        category: "Branding".into(),
        images: vec![
            "https://images.pexels.com/photos/1367276/pexels-photo-1367276.jpeg?auto=compress&cs=tinysrgb&w=800"
                .into(),
        ],
        client_id: joao.id,
        client_name: joao.name.clone(),
        budget: Some(Decimal::from(3500)),
        deadline: NaiveDate::from_ymd_opt(2024, 2, 15),
    });
    project.apply(ProjectUpdate {
        status: Some(ProjectStatus::Review),
        ..Default::default()
    });
    project.add_comment(&admin, "Primeira versão da logo está pronta para aprovação")?;

    projects.create(&project).await?;

    tracing::info!("seeded demo users and sample project (password: {DEMO_PASSWORD})");
    Ok(())
}

/// The landing-page catalogs the original site shipped with
pub fn demo_catalog() -> (Vec<PortfolioItem>, Vec<Service>) {
    let portfolio = vec![
        portfolio_item(
            "Campanha Digital Verão",
            "Marketing Digital",
            "https://images.pexels.com/photos/1367276/pexels-photo-1367276.jpeg?auto=compress&cs=tinysrgb&w=800",
            "Campanha completa para redes sociais com foco no verão",
            true,
        ),
        portfolio_item(
            "Identidade Visual Restaurante",
            "Branding",
            "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=800",
            "Logo, cardápio e materiais gráficos para restaurante",
            true,
        ),
        portfolio_item(
            "Website Corporativo",
            "Web Design",
            "https://images.pexels.com/photos/196644/pexels-photo-196644.jpeg?auto=compress&cs=tinysrgb&w=800",
            "Design e desenvolvimento de site institucional",
            false,
        ),
        portfolio_item(
            "Embalagem Produto",
            "Design Gráfico",
            "https://images.pexels.com/photos/1090638/pexels-photo-1090638.jpeg?auto=compress&cs=tinysrgb&w=800",
            "Design de embalagem para linha de produtos",
            true,
        ),
    ];

    let services = vec![
        service(
            "Identidade Visual",
            "Criação de logo, paleta de cores, tipografia e manual da marca",
            "Palette",
            Some("A partir de R$ 1.500"),
        ),
        service(
            "Marketing Digital",
            "Campanhas para redes sociais, Google Ads e e-mail marketing",
            "Megaphone",
            Some("A partir de R$ 800"),
        ),
        service(
            "Web Design",
            "Design e desenvolvimento de websites responsivos e modernos",
            "Monitor",
            Some("A partir de R$ 2.500"),
        ),
        service(
            "Design Gráfico",
            "Flyers, cartões, banners e materiais impressos diversos",
            "FileText",
            Some("A partir de R$ 200"),
        ),
    ];

    (portfolio, services)
}

fn portfolio_item(
    title: &str,
    category: &str,
    image: &str,
    description: &str,
    featured: bool,
) -> PortfolioItem {
    PortfolioItem {
        id: Uuid::new_v4(),
        title: title.to_string(),
        category: category.to_string(),
        image: image.to_string(),
        description: description.to_string(),
        featured,
    }
}

fn service(name: &str, description: &str, icon: &str, price: Option<&str>) -> Service {
    Service {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        price: price.map(str::to_string),
    }
}
