use crate::catalog::{LearningResource, ResourceKind};

fn resource(
    skill: &str,
    platform: &str,
    title: &str,
    kind: ResourceKind,
    duration: &str,
    level: &str,
    url: &str,
) -> LearningResource {
    LearningResource {
        skill: skill.to_string(),
        platform: platform.to_string(),
        title: title.to_string(),
        kind,
        duration: duration.to_string(),
        level: level.to_string(),
        url: url.to_string(),
    }
}

pub fn entries() -> Vec<LearningResource> {
    vec![
        resource(
            "Docker",
            "Udemy",
            "Docker Mastery: Complete Toolset From a Docker Captain",
            ResourceKind::Course,
            "19 hours",
            "Beginner to Advanced",
            "https://www.udemy.com/course/docker-mastery/",
        ),
        resource(
            "Kubernetes",
            "Coursera",
            "Getting Started with Google Kubernetes Engine",
            ResourceKind::Course,
            "8 hours",
            "Intermediate",
            "https://www.coursera.org/learn/google-kubernetes-engine",
        ),
        resource(
            "TypeScript",
            "YouTube",
            "TypeScript Full Course for Beginners",
            ResourceKind::Video,
            "8 hours",
            "Beginner",
            "https://www.youtube.com/watch?v=gp5H0Vw39yw",
        ),
        resource(
            "GraphQL",
            "FreeCodeCamp",
            "GraphQL Full Course - Novice to Expert",
            ResourceKind::Video,
            "4 hours",
            "Beginner to Intermediate",
            "https://www.youtube.com/watch?v=ed8SzALpx1Q",
        ),
        resource(
            "MongoDB",
            "MongoDB University",
            "MongoDB Basics",
            ResourceKind::Course,
            "Self-paced",
            "Beginner",
            "https://university.mongodb.com/",
        ),
    ]
}
