pub mod math_problem_dto;
