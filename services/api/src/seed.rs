//! Initial course catalog
//!
//! The catalog is immutable after seeding; there is no admin surface for
//! adding or editing courses.

use crate::models::catalog::NewCourse;

/// The courses the marketplace launches with
pub fn course_seed() -> Vec<NewCourse> {
    vec![
        NewCourse {
            title: "Full-Stack Web Development".to_string(),
            description: "Master both frontend and backend technologies. Build complete \
                          web applications from scratch with modern JavaScript frameworks."
                .to_string(),
            price: 12999,
            duration: 60,
            image_url: "https://images.unsplash.com/photo-1517694712202-14dd9538aa97".to_string(),
            rating: 45,
            review_count: 1234,
            featured: true,
            is_new: false,
            is_bestseller: true,
        },
        NewCourse {
            title: "React & Redux Masterclass".to_string(),
            description: "Learn to build complex, scalable user interfaces with React and \
                          manage application state with Redux."
                .to_string(),
            price: 8999,
            duration: 40,
            image_url: "https://images.unsplash.com/photo-1555949963-ff9fe0c870eb".to_string(),
            rating: 50,
            review_count: 897,
            featured: false,
            is_new: false,
            is_bestseller: false,
        },
        NewCourse {
            title: "Backend Development with Node.js".to_string(),
            description: "Build scalable APIs and server-side applications with Node.js. \
                          Includes Express, MongoDB, and authentication."
                .to_string(),
            price: 9999,
            duration: 50,
            image_url: "https://images.unsplash.com/photo-1593720213428-28a5b9e94613".to_string(),
            rating: 40,
            review_count: 456,
            featured: false,
            is_new: true,
            is_bestseller: false,
        },
        NewCourse {
            title: "Advanced JavaScript Concepts".to_string(),
            description: "Deep dive into JavaScript's advanced features: closures, \
                          prototypes, async/await, generators, and more."
                .to_string(),
            price: 7999,
            duration: 35,
            image_url: "https://images.unsplash.com/photo-1498050108023-c5249f4df085".to_string(),
            rating: 45,
            review_count: 723,
            featured: true,
            is_new: false,
            is_bestseller: false,
        },
        NewCourse {
            title: "Modern CSS & SASS".to_string(),
            description: "Master modern CSS techniques, Flexbox, Grid, CSS variables, and \
                          SASS to create responsive and beautiful designs."
                .to_string(),
            price: 6999,
            duration: 30,
            image_url: "https://images.unsplash.com/photo-1507721999472-8ed4421c4af2".to_string(),
            rating: 45,
            review_count: 512,
            featured: false,
            is_new: false,
            is_bestseller: false,
        },
        NewCourse {
            title: "TypeScript for Professionals".to_string(),
            description: "Learn how to leverage TypeScript to build robust, type-safe \
                          applications and improve your development workflow."
                .to_string(),
            price: 8499,
            duration: 45,
            image_url: "https://images.unsplash.com/photo-1607798748738-b15c40d33d57".to_string(),
            rating: 45,
            review_count: 345,
            featured: false,
            is_new: true,
            is_bestseller: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_records_satisfy_catalog_bounds() {
        let seeds = course_seed();
        assert_eq!(seeds.len(), 6);
        for course in &seeds {
            assert!(course.price > 0, "{} has non-positive price", course.title);
            assert!(
                (0..=50).contains(&course.rating),
                "{} has rating outside 0..=50",
                course.title
            );
        }
    }
}
